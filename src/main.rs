mod app;
mod chat;
mod config;
mod context;
mod logging;
mod paths;
mod prompts;
mod providers;
mod renderer;
mod store;

fn main() {
    logging::init();

    if let Err(e) = app::run() {
        eprintln!("{:#}", e); // pretty anyhow chain
        std::process::exit(1);
    }
}
