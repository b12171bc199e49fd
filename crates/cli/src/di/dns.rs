use anyhow::anyhow;
use dns_relay_application::use_cases::HandleDnsQueryUseCase;
use dns_relay_domain::Config;
use dns_relay_infrastructure::dns::transport::udp::UdpTransport;
use dns_relay_infrastructure::dns::{DnsServerHandler, PacketCodec, RecordTypePolicy, UdpForwarder};
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let server_addr = config.upstream.socket_addr().map_err(|e| anyhow!(e))?;
        let local_addr = config.upstream.local_addr().map_err(|e| anyhow!(e))?;
        let codec = PacketCodec::new(RecordTypePolicy::from_strict_flag(
            config.codec.strict_record_types,
        ));

        info!(
            upstream = %server_addr,
            timeout_ms = config.upstream.query_timeout_ms,
            policy = ?codec.policy(),
            "Initializing DNS services"
        );

        let transport = Arc::new(UdpTransport::new(server_addr, local_addr));
        let forwarder = Arc::new(UdpForwarder::new(
            transport,
            codec,
            config.upstream.query_timeout(),
        ));
        let use_case = Arc::new(HandleDnsQueryUseCase::new(forwarder));

        Ok(Self {
            handler: DnsServerHandler::new(use_case, codec),
        })
    }
}
