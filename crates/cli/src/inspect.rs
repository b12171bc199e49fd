use anyhow::Context;
use dns_relay_domain::{Config, Packet, ResourceRecord};
use dns_relay_infrastructure::dns::{PacketCodec, RecordTypePolicy};
use std::path::Path;

/// Decode one captured message and print it in zone-file style.
pub fn run(path: &Path, config: &Config) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let codec = PacketCodec::new(RecordTypePolicy::from_strict_flag(
        config.codec.strict_record_types,
    ));
    let packet = codec
        .decode(&bytes)
        .with_context(|| format!("Failed to decode {}", path.display()))?;

    print!("{}", render(&packet));
    Ok(())
}

fn render(packet: &Packet) -> String {
    let header = &packet.header;
    let mut out = format!(
        ";; id: {} opcode: {} status: {}\n;; flags:{}{}{}{}{}{}{}; QUERY: {}, ANSWER: {}, AUTHORITY: {}, ADDITIONAL: {}\n",
        header.id,
        header.opcode,
        header.rescode,
        flag(header.response, " qr"),
        flag(header.authoritative_answer, " aa"),
        flag(header.truncated_message, " tc"),
        flag(header.recursion_desired, " rd"),
        flag(header.recursion_available, " ra"),
        flag(header.authed_data, " ad"),
        flag(header.checking_disabled, " cd"),
        header.questions,
        header.answers,
        header.authoritative_entries,
        header.resource_entries,
    );

    out.push_str("\n;; QUESTION SECTION:\n");
    for question in &packet.questions {
        out.push_str(&format!(";{}\n", question));
    }

    render_section(&mut out, "ANSWER", &packet.answers);
    render_section(&mut out, "AUTHORITY", &packet.authorities);
    render_section(&mut out, "ADDITIONAL", &packet.resources);
    out
}

fn render_section(out: &mut String, title: &str, records: &[ResourceRecord]) {
    if records.is_empty() {
        return;
    }
    out.push_str(&format!("\n;; {} SECTION:\n", title));
    for record in records {
        out.push_str(&format!("{}\n", record));
    }
}

fn flag(set: bool, name: &'static str) -> &'static str {
    if set {
        name
    } else {
        ""
    }
}
