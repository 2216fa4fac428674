use anyhow::{Context, Result, bail};
use tracing::{info, info_span};

use risk_cli::render::{columns_table, values_table, view_table};
use risk_cli::request::ViewRequest;
use risk_model::PredictResponse;
use risk_view::ViewSession;

use crate::cli::{ReportArgs, ShowArgs, ValuesArgs};

struct LoadedReport {
    session: ViewSession,
    download_url: String,
}

fn load_report(args: &ReportArgs) -> Result<LoadedReport> {
    let response = PredictResponse::load(&args.payload)
        .with_context(|| format!("load prediction payload {}", args.payload.display()))?;
    let download_url = response.download_url(&args.api_base);
    let dataset = response.into_dataset();
    info!(
        report = %dataset.report_key(),
        rows = dataset.row_count(),
        columns = dataset.column_universe().len(),
        "report loaded"
    );
    Ok(LoadedReport {
        session: ViewSession::new(dataset),
        download_url,
    })
}

pub fn run_show(args: &ShowArgs) -> Result<()> {
    let LoadedReport {
        mut session,
        download_url,
    } = load_report(&args.report)?;
    let span = info_span!("show", report = %session.report_key());
    let _guard = span.enter();

    args.view_request().apply_to(&mut session);
    let view = session.view();
    info!(
        shown = view.row_count(),
        total = session.dataset().row_count(),
        "view composed"
    );

    println!("Report: {}", session.report_key());
    println!(
        "Rows: {} of {}",
        view.row_count(),
        session.dataset().row_count()
    );
    println!("Download: {download_url}");
    if view.columns.is_empty() {
        println!("(no columns to show)");
        return Ok(());
    }
    println!("{}", view_table(&view, session.sort(), args.limit));
    if let Some(limit) = args.limit
        && view.row_count() > limit
    {
        println!("... {} more rows", view.row_count() - limit);
    }
    Ok(())
}

pub fn run_columns(args: &ReportArgs) -> Result<()> {
    let LoadedReport { session, .. } = load_report(args)?;
    let universe = session.column_universe();
    println!("{}", columns_table(&universe, &session.visible_columns()));
    Ok(())
}

pub fn run_values(args: &ValuesArgs) -> Result<()> {
    let LoadedReport { mut session, .. } = load_report(&args.report)?;
    if !session.dataset().has_column(&args.column) {
        bail!(
            "column `{}` is not in report {}",
            args.column,
            session.report_key()
        );
    }
    ViewRequest {
        hidden_values: args.hidden_values.clone(),
        ..ViewRequest::default()
    }
    .apply_to(&mut session);
    session.open_column(args.column.clone());
    println!("{}", values_table(&args.column, &session.value_options()));
    Ok(())
}
