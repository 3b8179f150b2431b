//! レポート生成画面
//!
//! Step 1 フィードバック区分 → Step 2 アップロード →
//! Step 3 レポート区分（ステークホルダーのみ）→ 生成/チャート表示

use crate::api::report_service::{BrowserFile, BrowserReportService};
use crate::components::{
    chart_gallery::ChartGallery, export_buttons::ExportButtons, progress_bar::ProgressBar,
    upload_area::UploadArea,
};
use crate::driver::ReportDriver;
use feedback_catalyst_common::{Event, FeedbackType, Phase, ReportType};
use leptos::html::Input;
use leptos::prelude::*;

#[component]
pub fn ReportPage() -> impl IntoView {
    let driver = ReportDriver::new();
    let session = driver.session();
    let input_ref = NodeRef::<Input>::new();
    let endpoints = BrowserReportService::default().endpoints().clone();

    let feedback_type = Signal::derive(move || session.with(|s| s.feedback_type()));
    let report_type = Signal::derive(move || session.with(|s| s.report_type()));
    let status = Signal::derive(move || session.with(|s| s.status().clone()));
    let busy = Signal::derive(move || session.with(|s| s.is_busy()));
    let uploading = Signal::derive(move || session.with(|s| s.phase() == Phase::Uploading));
    let has_headers = move || session.with(|s| s.has_headers());
    let shows_report_type = move || session.with(|s| s.shows_report_type());
    let step = Signal::derive(move || if feedback_type.get().uses_report_type() { 4u8 } else { 3 });
    let chart_urls = Signal::derive(move || {
        session.with(|s| {
            s.chart_urls()
                .iter()
                .map(|url| endpoints.resolve_chart(url))
                .collect::<Vec<_>>()
        })
    });

    let on_feedback_type = move |feedback_type: FeedbackType| {
        // 同じファイルを選び直せるように入力を空にする
        if let Some(input) = input_ref.get_untracked() {
            input.set_value("");
        }
        driver.send(Event::SelectFeedbackType(feedback_type));
    };
    let on_report_type = move |report_type: ReportType| {
        driver.send(Event::SelectReportType(report_type));
    };
    let on_file = move |file: web_sys::File| {
        driver.send(Event::ChooseFile(BrowserFile::new(file)));
    };

    view! {
        <div class="report-container">
            <div class="report-header">
                <h1>"Generate Report Archive or View Charts"</h1>
                <p>"Upload your dataset and create insightful reports and visualizations"</p>
            </div>

            <div class="step-section">
                <h2>"Step 1: Select Feedback Type"</h2>
                <div class="feedback-type-selection">
                    {FeedbackType::ALL
                        .into_iter()
                        .map(|option| view! {
                            <label class="feedback-type-option">
                                <input
                                    type="radio"
                                    name="feedbackType"
                                    value=option.as_str()
                                    prop:checked=move || feedback_type.get() == option
                                    on:change=move |_| on_feedback_type(option)
                                />
                                {option.label()}
                            </label>
                        })
                        .collect_view()}
                </div>
            </div>

            <div class="step-section">
                <h2>"Step 2: Upload Your File"</h2>
                <UploadArea input_ref=input_ref disabled=busy uploading=uploading on_file=on_file />
                <ProgressBar status=status busy=busy />
            </div>

            <Show when=shows_report_type>
                <div class="step-section">
                    <h2>"Step 3: Choose Report Type"</h2>
                    <div class="report-type-selection">
                        {ReportType::ALL
                            .into_iter()
                            .map(|option| view! {
                                <label class="report-type-option">
                                    <input
                                        type="radio"
                                        name="reportType"
                                        value=option.as_str()
                                        prop:checked=move || report_type.get() == option
                                        on:change=move |_| on_report_type(option)
                                    />
                                    {option.label()}
                                </label>
                            })
                            .collect_view()}
                    </div>
                </div>
            </Show>

            <Show when=has_headers>
                <ExportButtons
                    step=step
                    busy=busy
                    on_generate=move |_| driver.send(Event::GenerateReport)
                    on_view_charts=move |_| driver.send(Event::ViewCharts)
                />
            </Show>

            <ChartGallery chart_urls=chart_urls />
        </div>
    }
}
