mod io_ops;
mod tetres_app;
mod tetres_cli_error;
mod tetres_work_handler;

pub use io_ops::{read_json, read_traffic_csv, write_csv, write_json, TrafficRecord};
pub use tetres_app::{RouteInputArgs, TetresApp, TetresOperation};
pub use tetres_cli_error::TetresCliError;
pub use tetres_work_handler::TetresWorkHandler;
