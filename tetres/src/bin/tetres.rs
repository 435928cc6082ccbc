use clap::Parser;
use tetres::app::TetresApp;

fn main() {
    env_logger::init();
    let args = TetresApp::parse();
    if let Err(e) = args.op.run() {
        log::error!("tetres failed: {e}");
        eprintln!("{e}");
        std::process::exit(1);
    }
}
