pub mod browser;
pub mod errors;
pub mod percent;
pub mod table;
pub mod tolerance;
pub mod types;
pub mod wiki;

pub use browser::BrowserSession;
pub use errors::{CheckError, Result};
pub use percent::{parse_percent, Percent};
pub use tolerance::{ExclusionBand, Tolerance};
pub use types::{BrowserConfig, CheckConfig, Viewport};
pub use wiki::WikiExplorer;
