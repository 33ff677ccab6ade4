//! Command-line front end for the quote pipeline.
//!
//! ```text
//! construction-quoter <estimate|quote> [--export] [--share] [--email] key=value...
//! ```

use std::io;
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use construction_quoter::adapters::document::{DocumentBranding, PrintHtmlRenderer, RemotePdfRenderer};
use construction_quoter::adapters::email::HttpEmailSender;
use construction_quoter::adapters::pricing::{HttpPricingConfig, HttpPricingService};
use construction_quoter::adapters::share::CommandShareChannel;
use construction_quoter::adapters::terminal::TerminalPresenter;
use construction_quoter::application::{QuoteExporter, QuotePipeline, QuoteSharer, ShareTarget};
use construction_quoter::config::{AppConfig, RendererKind};
use construction_quoter::domain::foundation::Timestamp;
use construction_quoter::domain::quote::{FlowKind, FormFields};
use construction_quoter::logging::init_logging;
use construction_quoter::ports::{DocumentRenderer, PricingService};

const USAGE: &str =
    "usage: construction-quoter <estimate|quote> [--export] [--share] [--email] key=value...";

/// Parsed command line.
#[derive(Debug, PartialEq)]
struct CliArgs {
    flow: FlowKind,
    export: bool,
    share: bool,
    email: bool,
    fields: FormFields,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut args = args.into_iter();
        let flow = match args.next().as_deref() {
            Some("estimate") => FlowKind::QuickEstimate,
            Some("quote") => FlowKind::DetailedQuote,
            Some(other) => bail!("unknown command '{}'\n{}", other, USAGE),
            None => bail!(USAGE),
        };

        let mut cli = CliArgs {
            flow,
            export: false,
            share: false,
            email: false,
            fields: FormFields::new(),
        };

        for arg in args {
            match arg.as_str() {
                "--export" => cli.export = true,
                "--share" => cli.share = true,
                "--email" => cli.email = true,
                _ => {
                    let (key, value) = arg
                        .split_once('=')
                        .with_context(|| format!("expected key=value, got '{}'\n{}", arg, USAGE))?;
                    cli.fields.insert(key.trim(), value);
                }
            }
        }

        Ok(cli)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load_validated().context("Failed to load configuration")?;
    init_logging(&config.runtime);

    let mut cli = CliArgs::parse(std::env::args().skip(1))?;
    cli.fields.stamp_start(Timestamp::now());

    tracing::info!(
        env = ?config.runtime.environment,
        pricing_url = %config.pricing.base_url,
        flow = %cli.flow,
        "Starting construction quoter"
    );

    let pricing = build_pricing_service(&config)?;
    let pipeline = Arc::new(QuotePipeline::new(pricing));
    let presenter = tokio::spawn(TerminalPresenter::new(io::stdout()).run(pipeline.subscribe()));

    let completed = run(&config, &cli, pipeline).await;

    // Every pipeline handle is gone by now, so the presenter drains and stops.
    presenter.await.context("Presenter task failed")?;

    if !completed? {
        std::process::exit(1);
    }
    Ok(())
}

/// Runs the flow and the requested follow-up actions. Returns whether the
/// flow produced a result.
async fn run(config: &AppConfig, cli: &CliArgs, pipeline: Arc<QuotePipeline>) -> Result<bool> {
    let outcome = match cli.flow {
        FlowKind::QuickEstimate => pipeline.request_quick_estimate(&cli.fields).await,
        FlowKind::DetailedQuote => pipeline.submit_detailed_quote(&cli.fields).await,
    };
    if !outcome.is_completed() {
        tracing::debug!(outcome = ?outcome, "Flow did not complete");
        return Ok(false);
    }

    if cli.export {
        let exporter = QuoteExporter::new(Arc::clone(&pipeline), build_renderer(config)?);
        // Failures are already reported as notices.
        let _ = exporter
            .export_to_dir(cli.flow, &config.export.output_dir)
            .await;
    }

    if cli.share || cli.email {
        let sharer = build_sharer(config, Arc::clone(&pipeline))?;

        if cli.share {
            let shared = match cli.flow {
                FlowKind::QuickEstimate => sharer.share_estimate().await,
                FlowKind::DetailedQuote => sharer.share_quote().await,
            };
            if let Err(err) = shared {
                tracing::debug!(error = %err, "Share did not complete");
            }
        }

        if cli.email {
            let _ = sharer.send_quote_email().await;
        }
    }

    Ok(true)
}

fn build_pricing_service(config: &AppConfig) -> Result<Arc<dyn PricingService>> {
    let pricing = &config.pricing;
    let mut http = HttpPricingConfig::new(&pricing.base_url)
        .with_paths(&pricing.estimate_path, &pricing.quote_path)
        .with_timeout(pricing.timeout());
    if let Some(token) = &pricing.api_token {
        http = http.with_api_token(token.clone());
    }

    let service = HttpPricingService::new(http).context("Failed to create pricing client")?;
    Ok(Arc::new(service))
}

fn build_renderer(config: &AppConfig) -> Result<Arc<dyn DocumentRenderer>> {
    let export = &config.export;
    let renderer: Arc<dyn DocumentRenderer> = match export.renderer {
        RendererKind::Print => Arc::new(PrintHtmlRenderer::new(DocumentBranding {
            company_name: export.company_name.clone(),
            tagline: export.tagline.clone(),
            contact_line: export.contact_line.clone(),
        })),
        RendererKind::Remote => Arc::new(
            RemotePdfRenderer::new(
                &config.pricing.base_url,
                &export.pdf_path,
                config.pricing.timeout(),
            )
            .context("Failed to create PDF client")?,
        ),
    };
    Ok(renderer)
}

fn build_sharer(config: &AppConfig, pipeline: Arc<QuotePipeline>) -> Result<QuoteSharer> {
    let channel = Arc::new(CommandShareChannel::new(&config.share.opener_command));
    let target = ShareTarget {
        messaging_base_url: config.share.messaging_base_url.clone(),
        whatsapp_number: config.share.whatsapp_number.clone(),
    };
    let mut sharer = QuoteSharer::new(pipeline, channel, target);

    if config.email.enabled {
        let sender = HttpEmailSender::new(
            &config.pricing.base_url,
            &config.email.send_path,
            config.pricing.timeout(),
        )
        .context("Failed to create email client")?;
        sharer = sharer.with_email_sender(Arc::new(sender));
    }

    Ok(sharer)
}
