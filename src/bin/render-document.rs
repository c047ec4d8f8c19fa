//! Render a stored portfolio document from disk without the API.
//!
//! Usage: render-document <FILE|-> [--preview] [--json] [--out DIR]
//!
//! With `--out`, the page is written to `DIR/<slug>.html` instead of stdout.

use std::io::Read;
use std::path::PathBuf;
use std::{env, fs, io};

use portfolio_renderer::config::AppConfig;
use portfolio_renderer::document::PortfolioDocument;
use portfolio_renderer::render::page::{render_page, PageSite};
use portfolio_renderer::render::{render_report, RenderMode};
use portfolio_renderer::variants::standard_registry;

fn usage() -> ! {
    eprintln!("Usage: cargo run --bin render-document <FILE|-> [--preview] [--json] [--out DIR]");
    std::process::exit(1);
}

fn read_input(path: &str) -> io::Result<String> {
    if path == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn main() {
    let mut path = None;
    let mut preview = false;
    let mut as_json = false;
    let mut out_dir: Option<PathBuf> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--preview" => preview = true,
            "--json" => as_json = true,
            "--out" => match args.next() {
                Some(dir) => out_dir = Some(PathBuf::from(dir)),
                None => usage(),
            },
            _ if path.is_none() => path = Some(arg),
            _ => usage(),
        }
    }
    let Some(path) = path else { usage() };

    let raw = match read_input(&path) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Error reading {}: {}", path, e);
            std::process::exit(1);
        }
    };

    let document = match serde_json::from_str(&raw)
        .map_err(|e| e.to_string())
        .and_then(|value| PortfolioDocument::from_json(value).map_err(|e| e.to_string()))
    {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Invalid portfolio document: {}", e);
            std::process::exit(1);
        }
    };

    let config = AppConfig::from_env();
    let registry = standard_registry();
    let mode = RenderMode::from_preview_flag(preview);
    let report = render_report(&document, &registry, mode);

    for diagnostic in &report.diagnostics {
        eprintln!(
            "skipped block #{} '{}': {:?}",
            diagnostic.position, diagnostic.block_id, diagnostic.kind
        );
    }

    if as_json && out_dir.is_some() {
        usage();
    }

    if as_json {
        match serde_json::to_string_pretty(&report) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error encoding report: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        let site = PageSite {
            name: &config.site_name,
            mode,
        };
        let page = render_page(&document, &report.sections, site);
        match out_dir {
            Some(dir) => {
                let slug = document.slug();
                if slug.is_empty() {
                    eprintln!("Portfolio name '{}' has no usable slug", document.name);
                    std::process::exit(1);
                }
                let file = dir.join(format!("{}.html", slug));
                if let Err(e) = fs::write(&file, page.into_string()) {
                    eprintln!("Error writing {}: {}", file.display(), e);
                    std::process::exit(1);
                }
                eprintln!("wrote {}", file.display());
            }
            None => print!("{}", page),
        }
    }
}
