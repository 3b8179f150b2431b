//! アップロードセッションの駆動
//!
//! イベントを適用してシグナルを更新し、返ってきた副作用を
//! `spawn_local` で実行して結果を再びイベントとして流す。

use crate::api::download::BrowserDownload;
use crate::api::report_service::{BrowserFile, BrowserReportService};
use feedback_catalyst_common::{run_effect, Event, UploadSession};
use gloo::console;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// レポート画面のセッション
#[derive(Clone, Copy)]
pub struct ReportDriver {
    session: RwSignal<UploadSession<BrowserFile>, LocalStorage>,
}

impl ReportDriver {
    pub fn new() -> Self {
        Self {
            session: RwSignal::new_local(UploadSession::new()),
        }
    }

    pub fn session(&self) -> RwSignal<UploadSession<BrowserFile>, LocalStorage> {
        self.session
    }

    pub fn send(self, event: Event<BrowserFile>) {
        let mut effect = None;
        self.session.update(|session| {
            let (next, next_effect) = std::mem::take(session).apply(event);
            *session = next;
            effect = next_effect;
        });

        if let Some(effect) = effect {
            console::debug!(format!("{:?} (ticket {})", effect.action(), effect.ticket()));
            spawn_local(async move {
                let service = BrowserReportService::default();
                let completion = run_effect(&service, &BrowserDownload, effect).await;
                self.send(completion);
            });
        }
    }
}

impl Default for ReportDriver {
    fn default() -> Self {
        Self::new()
    }
}
