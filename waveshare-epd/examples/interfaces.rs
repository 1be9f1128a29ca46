//! Show local IPv4 addresses, one per line

use std::process::Command as Process;

use anyhow::Context;
use waveshare_epd::{Command, FontSize, Palette, SerialTransport, Session};

/// Next free text line on the panel
struct LineWriter {
    line: u16,
    height: u16,
}

impl LineWriter {
    fn new(size: FontSize) -> Self {
        Self {
            line: 1,
            height: size.pixels(),
        }
    }

    async fn write(&mut self, paper: &mut Session, text: &str) -> waveshare_epd::Result<()> {
        let y = i64::from(self.line) * i64::from(self.height);
        self.line += 1;
        paper.send(&Command::display_text(0, y, text.to_owned())?).await
    }
}

/// Parse `ip -o -4 a` output into (interface, address) pairs
fn parse_addresses(output: &str) -> Vec<(String, String)> {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let name = fields.nth(1)?;
            let addr = fields.skip_while(|f| *f != "inet").nth(1)?;
            Some((name.trim_end_matches(':').to_string(), addr.to_string()))
        })
        .collect()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    
    let output = Process::new("ip")
        .args(["-o", "-4", "a"])
        .output()
        .context("running `ip -o -4 a`")?;
    let addresses = parse_addresses(&String::from_utf8_lossy(&output.stdout));
    
    let port = std::env::var("EPD_PORT").unwrap_or_else(|_| "/dev/ttyAMA0".to_string());
    
    let mut paper = Session::new(SerialTransport::new(port));
    paper.connect().await?;
    
    paper.send(&Command::Handshake).await?;
    paper.wait_until_idle().await?;
    
    let size = FontSize::Px32;
    paper.send(&Command::SetPallet { palette: Palette::default() }).await?;
    paper.send(&Command::SetEnFontSize { size }).await?;
    paper.send(&Command::SetZhFontSize { size }).await?;
    
    let mut lines = LineWriter::new(size);
    
    println!("Interfaces:");
    lines.write(&mut paper, "Interfaces:").await?;
    for (name, addr) in &addresses {
        let text = format!("  {}: {}", name, addr);
        println!("{}", text);
        lines.write(&mut paper, &text).await?;
        lines.write(&mut paper, "").await?;
    }
    
    paper.trigger_refresh().await?;
    paper.wait_until_idle().await?;
    
    paper.close().await?;
    
    Ok(())
}
