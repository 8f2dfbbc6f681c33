//! Act as the client: validate, submit to the proxy, render.

use cfp_core::lifestyle::LifestyleInput;
use cfp_ui::render::Report;
use cfp_ui::session::{NoticeKind, Session};
use cfp_ui::transport::{EstimateTransport, HttpTransport};
use log::info;

pub async fn run_estimate(proxy_url: &str, input: LifestyleInput) -> anyhow::Result<()> {
    let transport = HttpTransport::new(proxy_url);
    let mut session = Session::new();

    if let Err(notice) = session.begin(&input) {
        anyhow::bail!("{}: {}", notice.title, notice.description);
    }
    if session.is_loading() {
        eprintln!("Analyzing...");
    }
    info!("Analyzing lifestyle data via {}", proxy_url);
    let outcome = transport.submit(&input).await;
    let notice = session.finish(outcome).clone();

    if notice.kind == NoticeKind::Failure {
        anyhow::bail!("{}: {}", notice.title, notice.description);
    }

    if let Some(completed) = session.current() {
        println!("{}", Report::from_result(&completed.result));
        println!(
            "{} ({})",
            notice.description,
            completed.received_at.format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(())
}
