//! Recommend command - styling advice for a known shape and tone.

use anyhow::Result;
use clap::Args;
use face_style_core::analysis::recommend;
use face_style_core::{FaceShape, SkinTone};

/// Arguments for the recommend command
#[derive(Args)]
pub struct RecommendArgs {
    /// Face shape, e.g. oval, inverted-triangle
    pub shape: FaceShape,

    /// Skin tone, e.g. fair, warm-light, cool_deep
    pub tone: SkinTone,

    /// Print a JSON array instead of one line per recommendation
    #[arg(long)]
    pub json: bool,
}

/// Run the recommend command.
pub fn run(args: &RecommendArgs) -> Result<()> {
    let lines = recommend(args.shape, args.tone);

    if args.json {
        println!("{}", serde_json::to_string(&lines)?);
    } else {
        for line in &lines {
            println!("{line}");
        }
    }
    Ok(())
}
