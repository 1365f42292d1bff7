use quarry_explain::{explain, load_request, resolve, to_json};

fn main() {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let output = resolve(std::env::args().skip(1), |key| std::env::var(key).ok())
        .and_then(|settings| {
            let request = load_request(&settings.request_path)?;
            let pipeline = explain(&request)?;
            to_json(&pipeline, settings.compact)
        });

    match output {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("quarry-explain: {e}");
            std::process::exit(1);
        }
    }
}
