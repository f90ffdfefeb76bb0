pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, plate, section, success, summary_row, warn};
pub use table::{stats_table, vehicle_table};
pub use theme::{Theme, theme};
