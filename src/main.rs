use cloudinary_mgr::{app::run_app, args};

fn main() {
    // Parse and validate command-line arguments
    let args = args::args_checks();

    if let Err(e) = run_app(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
