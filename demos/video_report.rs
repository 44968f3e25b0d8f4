use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    viewstats::example_apps::run_video_report(std::env::args().skip(1))
}
