mod cli;
mod commands;
mod render;
mod store;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
