//! Greetings at stepped positions in every font size

use std::time::Duration;

use tokio::time::sleep;
use waveshare_epd::{Command, FontSize, SerialTransport, Session};

const GREETINGS: [&str; 5] = ["hello", "hi", "salut", "hola", "Kamusta"];

#[tokio::main]
async fn main() -> waveshare_epd::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    
    let port = std::env::var("EPD_PORT").unwrap_or_else(|_| "/dev/ttyAMA0".to_string());
    
    let mut paper = Session::new(SerialTransport::new(port));
    paper.connect().await?;
    
    let reply = paper.handshake().await?;
    println!("Handshake: {}", String::from_utf8_lossy(&reply));
    
    paper.send(&Command::ClearScreen).await?;
    
    let sizes = [FontSize::Px32, FontSize::Px48, FontSize::Px64];
    for step in 0..10u16 {
        let size = sizes[usize::from(step) % sizes.len()];
        paper.send(&Command::SetEnFontSize { size }).await?;
        paper.send(&Command::SetZhFontSize { size }).await?;
        
        let greeting = GREETINGS[usize::from(step) % GREETINGS.len()];
        let (x, y) = (i64::from(step) * 64, i64::from(step) * 56);
        paper.send(&Command::display_text(x, y, greeting)?).await?;
    }
    
    paper.trigger_refresh().await?;
    sleep(Duration::from_secs(2)).await;
    
    paper.close().await?;
    
    Ok(())
}
