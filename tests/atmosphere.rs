//! Live end-to-end checks against ru.wikipedia.org.
//!
//! These need Chrome/Chromium installed plus network access and are marked
//! `#[ignore]`. Run with:
//!   cargo test -- --ignored

use atmocheck::{BrowserConfig, CheckConfig, ExclusionBand, Tolerance, WikiExplorer};

fn make_config() -> BrowserConfig {
    BrowserConfig {
        headless: true,
        ..Default::default()
    }
}

#[tokio::test]
#[ignore = "requires Chrome and network access"]
async fn earth_atmosphere_oxygen_within_tolerance() {
    let explorer = WikiExplorer::start(&make_config(), CheckConfig::default())
        .await
        .expect("Failed to launch browser");

    explorer.open_home().await.expect("Main page did not open");
    explorer.search("Земля").await.expect("Search failed");
    explorer
        .expect_heading_contains("Земля")
        .await
        .expect("Did not land on the Earth article");

    explorer
        .follow_link(
            &[
                "Атмосфера_Земли",
                "%D0%90%D1%82%D0%BC%D0%BE%D1%81%D1%84%D0%B5%D1%80%D0%B0_%D0%97%D0%B5%D0%BC%D0%BB%D0%B8",
            ],
            "Атмосфера Земли",
        )
        .await
        .expect("Atmosphere link not found");
    explorer
        .expect_heading_contains("Атмосфера Земли")
        .await
        .expect("Did not land on the atmosphere article");

    let oxygen = explorer
        .percent_from_captioned_table("Состав сухого воздуха", "Кислород")
        .await
        .expect("Oxygen percentage not found in the composition table");

    let window = Tolerance::new(20.95, 0.2);
    if let Err(e) = window.check(&oxygen) {
        panic!("{e}");
    }
}

#[tokio::test]
#[ignore = "requires Chrome and network access"]
async fn mars_atmosphere_oxygen_outside_earth_band() {
    let explorer = WikiExplorer::start(&make_config(), CheckConfig::default())
        .await
        .expect("Failed to launch browser");

    explorer.open_home().await.expect("Main page did not open");
    explorer.search("Марс").await.expect("Search failed");
    explorer
        .expect_heading_contains("Марс")
        .await
        .expect("Did not land on the Mars article");

    explorer
        .follow_link(
            &[
                "Атмосфера_Марса",
                "%D0%90%D1%82%D0%BC%D0%BE%D1%81%D1%84%D0%B5%D1%80%D0%B0_%D0%9C%D0%B0%D1%80%D1%81%D0%B0",
            ],
            "Атмосфера Марса",
        )
        .await
        .expect("Atmosphere link not found");
    explorer
        .expect_heading_contains("Атмосфера Марса")
        .await
        .expect("Did not land on the atmosphere article");

    // No captioned composition table on the Mars page; scan every table
    let oxygen = explorer
        .percent_from_any_table("Кислород")
        .await
        .expect("Oxygen percentage not found in any table");

    let band = ExclusionBand::new(20.5, 21.5);
    if let Err(e) = band.check_outside(&oxygen) {
        panic!("{e}");
    }
}
