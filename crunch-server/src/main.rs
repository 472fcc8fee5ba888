use std::io::{self, BufWriter, Write};
use std::time::Duration;

use clap::Parser;
use crunch_core::Comparison;
use crunch_server::{
    config::{resize_canvas, RenderSettings},
    loader::load_pair,
    svg::write_charts,
    web::Web,
    Cli, Command, LapArgs, RenderArgs,
};
use log::info;
use miette::{IntoDiagnostic, Result};
use tokio_graceful_shutdown::{SubsystemBuilder, Toplevel};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = RenderSettings::load(args.config.as_deref()).into_diagnostic()?;

    match args.command {
        Command::Compare(laps) => compare(laps),
        Command::Render(render_args) => render(render_args, settings),
        Command::Serve { port } => serve(port, settings).await,
    }
}

fn compare(laps: LapArgs) -> Result<()> {
    let window = laps.window().into_diagnostic()?;
    let [reference, other] = load_pair(&laps.reference, &laps.other).into_diagnostic()?;
    let comparison = Comparison::new(&reference, &other).into_diagnostic()?;
    let report = comparison.report(window).into_diagnostic()?;

    let mut out = BufWriter::new(io::stdout().lock());
    serde_json::to_writer_pretty(&mut out, &report).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;
    out.flush().into_diagnostic()
}

fn render(args: RenderArgs, mut settings: RenderSettings) -> Result<()> {
    let window = args.laps.window().into_diagnostic()?;
    if let Some(overlay) = args.overlay {
        settings.overlay = overlay;
    }
    settings.track_map = resize_canvas(&settings.track_map, args.width, args.height).into_diagnostic()?;
    settings.corner_analysis =
        resize_canvas(&settings.corner_analysis, args.width, args.height).into_diagnostic()?;

    let [reference, other] = load_pair(&args.laps.reference, &args.laps.other).into_diagnostic()?;
    let comparison = Comparison::new(&reference, &other).into_diagnostic()?;
    let written = write_charts(&comparison, &settings, window.as_ref(), &args.out).into_diagnostic()?;
    info!("Rendered {} chart(s) into {}", written.len(), args.out.display());
    Ok(())
}

async fn serve(port: u16, settings: RenderSettings) -> Result<()> {
    let web = Web::new(settings);

    Toplevel::new(move |s| async move {
        s.start(SubsystemBuilder::new("Webserver", move |a| web.run(port, a)));
    })
    .catch_signals()
    .handle_shutdown_requests(Duration::from_millis(1000))
    .await
    .map_err(Into::into)
}
