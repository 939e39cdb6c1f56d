use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use clap::Parser;
use serde::Deserialize;
use toppi::Encoding;
use toppi_core::rendering::stock::backgrounds_by_category;
use toppi_core::{
    AssetLibrary, DesignSettings, ExportFormat, FontBook, ListContent, ListTemplate,
    RenderPipeline, RendererConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "toppi-render",
    about = "Render a ranked list definition (JSON) to a share image"
)]
struct Args {
    /// List definition: { "title": ..., "items": [...], "design": {...} }
    #[arg(required_unless_present_any = ["list_formats", "list_backgrounds"])]
    list: Option<PathBuf>,

    /// Output file
    #[arg(short, long, required_unless_present_any = ["list_formats", "list_backgrounds"])]
    output: Option<PathBuf>,

    /// Export format name (see --list-formats)
    #[arg(short, long, default_value = "instagram-post")]
    format: String,

    /// Apply a named template before the design overrides
    #[arg(short, long)]
    template: Option<String>,

    /// JPEG quality, 0.0 to 1.0
    #[arg(short, long, default_value_t = toppi::DEFAULT_JPEG_QUALITY)]
    quality: f32,

    /// Write PNG instead of JPEG
    #[arg(long)]
    png: bool,

    /// Seed for procedural textures; omitted means a random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Directory of bundled background and sticker images
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Extra font directory (repeatable)
    #[arg(long = "font-dir")]
    font_dirs: Vec<PathBuf>,

    /// Skip system fonts
    #[arg(long)]
    no_system_fonts: bool,

    /// Print the export formats and exit
    #[arg(long)]
    list_formats: bool,

    /// Print the stock background catalog and exit
    #[arg(long)]
    list_backgrounds: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

/// JSON list definition.
#[derive(Deserialize, Debug)]
struct ListFile {
    #[serde(flatten)]
    content: ListContent,
    /// Design fields, merged over the template or the defaults
    #[serde(default)]
    design: Option<serde_json::Value>,
}

fn main() {
    let args = Args::parse();

    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.list_formats {
        print_formats();
    }
    if args.list_backgrounds {
        print_backgrounds();
    }
    if args.list_formats || args.list_backgrounds {
        return;
    }

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), String> {
    let (Some(list_path), Some(output)) = (&args.list, &args.output) else {
        return Err("a list file and --output are required".to_string());
    };

    let format = ExportFormat::from_name(&args.format).ok_or_else(|| {
        format!(
            "unknown format {:?} (expected one of: {})",
            args.format,
            ExportFormat::ALL.map(|f| f.name()).join(", ")
        )
    })?;

    let json = fs::read_to_string(list_path)
        .map_err(|e| format!("cannot read {}: {}", list_path.display(), e))?;
    let list: ListFile =
        serde_json::from_str(&json).map_err(|e| format!("invalid list file: {}", e))?;
    let settings = design_settings(args.template.as_deref(), list.design)?;

    let mut assets = AssetLibrary::new();
    if let Some(dir) = &args.assets {
        let count = assets
            .load_dir(dir)
            .map_err(|e| format!("cannot read assets from {}: {}", dir.display(), e))?;
        log::info!("Loaded {} assets from {}", count, dir.display());
    }

    let mut config = RendererConfig {
        font_dirs: args.font_dirs.clone(),
        load_system_fonts: !args.no_system_fonts,
        ..RendererConfig::default()
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let fonts = FontBook::load(&config.font_dirs, config.load_system_fonts);
    if fonts.is_empty() {
        log::warn!("No fonts found; text will not be drawn");
    }
    let pipeline = RenderPipeline::with_parts(config, Arc::new(fonts), Arc::new(assets));

    let image = pipeline
        .render(&list.content, &settings, format)
        .map_err(|e| e.to_string())?;

    let encoding = if args.png {
        Encoding::Png
    } else {
        Encoding::Jpeg {
            quality: args.quality,
        }
    };
    let bytes = encoding.encode(&image).map_err(|e| e.to_string())?;
    fs::write(output, &bytes).map_err(|e| format!("cannot write {}: {}", output.display(), e))?;

    println!(
        "Wrote {} ({}x{}, {} bytes)",
        output.display(),
        image.width(),
        image.height(),
        bytes.len()
    );
    Ok(())
}

/// Template defaults first, then the JSON design on top.
fn design_settings(
    template: Option<&str>,
    design: Option<serde_json::Value>,
) -> Result<DesignSettings, String> {
    let mut settings = match template {
        Some(name) => {
            let template = ListTemplate::from_name(name)
                .ok_or_else(|| format!("unknown template {:?}", name))?;
            DesignSettings::from_template(template)
        }
        None => DesignSettings::default(),
    };

    if let Some(serde_json::Value::Object(overrides)) = design {
        let mut merged = serde_json::to_value(&settings).map_err(|e| e.to_string())?;
        if let serde_json::Value::Object(base) = &mut merged {
            base.extend(overrides);
        }
        settings = serde_json::from_value(merged).map_err(|e| format!("invalid design: {}", e))?;
    }

    Ok(settings)
}

fn print_formats() {
    println!("Export formats:");
    for format in ExportFormat::ALL {
        let (w, h) = format.canvas_size();
        println!("  {:<16} {:<18} {}x{}", format.name(), format.display_name(), w, h);
    }
}

fn print_backgrounds() {
    println!("Stock backgrounds:");
    for (category, entries) in backgrounds_by_category() {
        println!("  {}", category.display_name());
        for bg in entries {
            println!("    {:<18} {}", bg.name, bg.display_name);
        }
    }
}
