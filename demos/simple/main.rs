use std::io::Read;

use openttd_edge::{EdgeConfig, EdgeHandler, FunctionName};

pub fn main() {
    env_logger::init();

    let name: FunctionName = std::env::var("EDGE_FUNCTION")
        .unwrap_or_else(|_| "index-redirect".to_owned())
        .parse()
        .unwrap();
    let handler = EdgeConfig::default().function(name);

    // Read a CloudFront event from stdin, e.g. tests/data/events/viewer-request.json.
    let mut event = String::new();
    std::io::stdin().read_to_string(&mut event).unwrap();

    match handler.invoke_json(&event) {
        Ok(result) => println!("{}", result),
        Err(err) => eprintln!("{}: {}", name, err),
    }
}
