pub mod chart_gallery;
pub mod export_buttons;
pub mod features;
pub mod footer;
pub mod header;
pub mod hero;
pub mod how_it_works;
pub mod login;
pub mod progress_bar;
pub mod report;
pub mod signup;
pub mod upload_area;
