pub fn run(host: &str, port: u16) {
    let base = format!("http://{host}:{port}");

    println!("Nonlocality Server v{}", nonlocality_core::VERSION);
    println!("   {base}");
    println!();
    println!("   Endpoints:");
    println!("     GET  /                  API index (try: curl {base})");
    println!("     GET  /health            Health check");
    println!("     GET  /api/v1/schedule   Bases, coefficients, gates (family=, qubits=)");
    println!("     GET  /api/v1/bounds     Classical and quantum bounds");
    println!("     POST /api/v1/witness    {{family, qubits, sub_experiments?, histograms}}");
    println!("     POST /api/v1/chsh       {{histograms, thetas?}}");
    println!();
    println!("   Examples:");
    println!("     curl '{base}/api/v1/schedule?family=mermin&qubits=3'");
    println!("     curl {base}/api/v1/bounds");
    println!();

    let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| super::fail(e));
    if let Err(e) = rt.block_on(nonlocality_server::run_server(host, port)) {
        super::fail(e);
    }
}
