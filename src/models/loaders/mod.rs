pub mod csv_loader;

pub use csv_loader::{load_chart_rows, load_table_data};
