use atmocheck::{BrowserConfig, CheckConfig, Tolerance, WikiExplorer};
use clap::{Arg, Command};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let matches = Command::new("atmocheck")
        .version("0.1.0")
        .about("Checks a percentage in a Wikipedia composition table against a tolerance window")
        .arg(
            Arg::new("headless")
                .long("headless")
                .help("Run browser in headless mode")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("article")
                .long("article")
                .help("Search term for the planet article")
                .default_value("Земля"),
        )
        .arg(
            Arg::new("link-fragment")
                .long("link-fragment")
                .help("href fragment of the atmosphere article link")
                .default_value("Атмосфера_Земли"),
        )
        .arg(
            Arg::new("link-text")
                .long("link-text")
                .help("Visible text of the atmosphere article link")
                .default_value("Атмосфера Земли"),
        )
        .arg(
            Arg::new("caption")
                .long("caption")
                .help("Caption of the composition table")
                .default_value("Состав сухого воздуха"),
        )
        .arg(
            Arg::new("row")
                .long("row")
                .help("Row label to read the percentage from")
                .default_value("Кислород"),
        )
        .arg(
            Arg::new("expected")
                .long("expected")
                .help("Expected percentage")
                .value_parser(clap::value_parser!(f64))
                .default_value("20.95"),
        )
        .arg(
            Arg::new("tolerance")
                .long("tolerance")
                .help("Allowed deviation from the expected percentage")
                .value_parser(clap::value_parser!(f64))
                .default_value("0.2"),
        )
        .get_matches();

    let article = matches.get_one::<String>("article").unwrap();
    let link_fragment = matches.get_one::<String>("link-fragment").unwrap();
    let link_text = matches.get_one::<String>("link-text").unwrap();
    let caption = matches.get_one::<String>("caption").unwrap();
    let row = matches.get_one::<String>("row").unwrap();
    let expected = *matches.get_one::<f64>("expected").unwrap();
    let tolerance = *matches.get_one::<f64>("tolerance").unwrap();

    let browser_config = BrowserConfig {
        headless: matches.get_flag("headless"),
        ..Default::default()
    };

    let explorer = WikiExplorer::start(&browser_config, CheckConfig::default()).await?;

    explorer.open_home().await?;
    explorer.search(article).await?;
    explorer.expect_heading_contains(article).await?;

    explorer
        .follow_link(&[link_fragment.as_str()], link_text)
        .await?;
    explorer.expect_heading_contains(link_text).await?;

    let measured = explorer.percent_from_captioned_table(caption, row).await?;
    info!(
        value = measured.value,
        source = %measured.source,
        "extracted percentage"
    );

    let window = Tolerance::new(expected, tolerance);
    window.check(&measured)?;

    info!(
        "{} is at {}%, within {}% - {}%",
        row,
        measured.value,
        window.min(),
        window.max()
    );

    Ok(())
}
