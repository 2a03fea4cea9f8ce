pub mod aggregate;
pub mod config;
pub mod directory;
pub mod lnd;
pub mod report;

use {
    aggregate::views,
    config::Config,
    directory::{ChannelDirectory, DirectoryBuilder},
    lnd::{ForwardingEvent, LightningApi, LndRestClient},
    report::charts::{self, Chart},
};

/// Fetch the forwarding history, enrich it with peer aliases and write the
/// aggregate report. Fully sequential: the directory is complete before any
/// view runs.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = LndRestClient::from_files(
        config.rest_url.clone(),
        &config.tls_cert_path,
        &config.macaroon_path,
    )?;

    log::info!("🔌 Fetching forwarding history from {}", config.rest_url);
    let events = client.forwarding_history(config.start_time).await?;
    log::info!("📥 Fetched {} forwarding events", events.len());

    let directory = DirectoryBuilder::new(&client).build(&events).await?;
    log::info!("📇 Resolved {} outbound channels", directory.len());

    let charts = build_charts(&events, &directory, config.sort_day_series);
    report::write_report(&config.output_path, &charts)?;
    log::info!("✅ Report ready: {}", config.output_path.display());

    Ok(())
}

/// The six aggregate views, in render order.
pub fn build_charts(
    events: &[ForwardingEvent],
    directory: &ChannelDirectory,
    sort_day_series: bool,
) -> Vec<Chart> {
    let mut daily_count = views::daily_route_count(events);
    let mut daily_fees = views::daily_route_fees(events);
    let mut daily_volume = views::daily_routing_volume(events);

    if sort_day_series {
        daily_count.sort_by_label();
        daily_fees.sort_by_label();
        daily_volume.sort_by_label();
    }

    vec![
        charts::line("Daily Count of Routes Processed", "Routing", &daily_count),
        charts::line("Daily Fees from Routes Processed", "Routing", &daily_fees),
        charts::volume_line("Daily Volume", "Routing", &daily_volume),
        charts::pie(
            "Sum of Route Fee by Outbound Channel",
            "Routing",
            &views::fees_by_outbound_channel(events, directory),
        ),
        charts::pie(
            "Sum of Route Fee by Inbound Channel",
            "Routing",
            &views::fees_by_inbound_channel(events, directory),
        ),
        charts::line(
            "Cumulative Sum of Routing Fees",
            "Routing",
            &views::cumulative_routing_fees(events),
        ),
    ]
}
