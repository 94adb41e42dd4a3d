//! Print traceroute probes in hex, without sending them.
use std::fs::File;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{info, warn};
use probecraft::builder::{assemble, ProbeBuilder};
use probecraft::models::{Probe, L4};

#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Args {
    /// Source address written in the probes.
    #[arg(long = "src", default_value_t = Ipv4Addr::UNSPECIFIED)]
    src_addr: Ipv4Addr,
    /// Destination address written in the probes.
    #[arg(long = "dst")]
    dst_addr: Ipv4Addr,
    /// Start from the first_ttl hop.
    #[arg(short = 'f', long = "first", default_value_t = 1)]
    first_ttl: u8,
    /// Set the max number of hops (max TTL to be reached).
    #[arg(short = 'm', long = "max-hops", default_value_t = 30)]
    max_ttl: u8,
    /// Use source port num for outgoing packets.
    #[arg(long = "sport", default_value_t = 33434)]
    sport: u16,
    /// Set the destination port to use.
    #[arg(short = 'p', long = "port", default_value_t = 33535)]
    dport: u16,
    /// Type of service.
    #[arg(short = 't', long = "tos", default_value_t = 0)]
    tos: u8,
    /// Transport protocol (udp or tcp).
    #[arg(short = 'P', long = "protocol", default_value_t = L4::UDP)]
    protocol: L4,
    /// Read probes from a CSV file (src_port,dst_port,ttl,id,tos,protocol) instead.
    #[arg(long = "input")]
    input: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let builder = ProbeBuilder::new(args.src_addr, args.dst_addr);
    info!("{}", builder);

    let probes: Vec<Probe> = match &args.input {
        Some(path) => csv::ReaderBuilder::new()
            .comment(Some(b'#'))
            .has_headers(false)
            .from_reader(File::open(path)?)
            .deserialize::<Probe>()
            .filter_map(|x| match x {
                Ok(probe) => Some(probe),
                Err(error) => {
                    warn!("{}", error);
                    None
                }
            })
            .collect(),
        None => (args.first_ttl..=args.max_ttl)
            .map(|ttl| Probe {
                src_port: args.sport,
                dst_port: args.dport,
                ttl,
                id: ttl as u16,
                tos: args.tos,
                protocol: args.protocol,
            })
            .collect(),
    };

    for probe in &probes {
        let (ip, transport) = match builder.build(probe) {
            Ok(parts) => parts,
            Err(error) => {
                warn!("skipping {:?}: {}", probe, error);
                continue;
            }
        };
        let packet = assemble(&ip, &transport)?;
        println!("{:>3} {}", probe.ttl, hex::encode(packet));
    }

    Ok(())
}
