//! アップロードエリアコンポーネント
//!
//! ドロップまたはファイル選択で1件だけ受け取る。

use leptos::html::Input;
use leptos::prelude::*;
use web_sys::{DragEvent, File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(
    /// リセット時に値を消すため親が持つ
    input_ref: NodeRef<Input>,
    disabled: Signal<bool>,
    uploading: Signal<bool>,
    on_file: F,
) -> impl IntoView
where
    F: Fn(File) + Clone + 'static,
{
    let (is_dragover, set_is_dragover) = signal(false);

    let on_drop = {
        let on_file = on_file.clone();
        move |ev: DragEvent| {
            ev.prevent_default();
            set_is_dragover.set(false);

            if disabled.get_untracked() {
                return;
            }

            let file = ev
                .data_transfer()
                .and_then(|dt| dt.files())
                .and_then(|files| files.get(0));
            if let Some(file) = file {
                on_file(file);
            }
        }
    };

    let on_dragover = move |ev: DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            set_is_dragover.set(true);
        }
    };

    let on_dragleave = move |_: DragEvent| {
        set_is_dragover.set(false);
    };

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            on_file(file);
        }
    };

    let on_choose = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-section"];
                if is_dragover.get() {
                    classes.push("dragover");
                }
                if disabled.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:drop=on_drop
            on:dragover=on_dragover
            on:dragleave=on_dragleave
        >
            <button
                class="btn-primary upload-btn"
                disabled=move || disabled.get()
                on:click=on_choose
            >
                {move || if uploading.get() { "Uploading..." } else { "Choose File" }}
            </button>
            <input
                type="file"
                accept=".csv,.xlsx"
                style="display: none"
                node_ref=input_ref
                on:change=on_change
            />
            <p class="file-types">"Supports .csv and .xlsx formats (max 5MB)"</p>
        </div>
    }
}
