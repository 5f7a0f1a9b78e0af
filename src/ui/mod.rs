pub mod app;
pub use app::App;

pub mod highlight;
mod input_handler;
pub mod result_list;
