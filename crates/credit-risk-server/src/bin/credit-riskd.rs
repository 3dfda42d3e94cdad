use std::io;

use credit_risk_server::{init_tracing, RiskServer, ServerConfig};

fn main() -> io::Result<()> {
    init_tracing();
    let config = ServerConfig::from_env()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;
    RiskServer::new(config).serve()
}
