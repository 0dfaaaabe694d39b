use std::path::Path;

use anyhow::{Context as _, Result, bail};
use intranet_core::landing::{
    SITE_ARCHIVE_NAME, SITE_FILES, SiteFile, Starfield, TILT_REST, ThemeSettings,
    bundle_failed_status, bundle_ready_status, bundle_site, tilt_transform,
};
use tracing::info;

pub fn theme(
    primary: Option<&str>,
    secondary: Option<&str>,
    glow: u8,
    surprise: bool,
) -> Result<()> {
    let settings = if surprise {
        ThemeSettings::surprise(&mut rand::thread_rng())
    } else {
        match (primary, secondary) {
            (Some(p), Some(s)) => ThemeSettings::new(p, s, glow),
            _ => bail!("Give both colors, or pass --surprise"),
        }
    };

    let applied = settings.apply();
    for (name, value) in &applied.properties {
        println!("{name}: {value};");
    }
    println!("{}", applied.status);
    Ok(())
}

pub fn starfield(width: f64, height: f64, frames: u32) {
    let mut rng = rand::thread_rng();
    let mut field = Starfield::new(width, height, &mut rng);
    for _ in 0..frames {
        field.step(&mut rng);
    }

    let (w, h) = field.size();
    println!("{} stars on {}x{} after {} frames", field.stars().len(), w, h, frames);
    for star in field.stars().iter().take(5) {
        println!(
            "  ({:.1}, {:.1}) r={:.2} alpha={:.2}",
            star.x,
            star.y,
            star.radius(),
            star.alpha()
        );
    }
}

pub fn tilt(left: f64, top: f64, width: f64, height: f64, pointer: Option<(f64, f64)>) {
    match pointer {
        Some((x, y)) => println!("{}", tilt_transform(left, top, width, height, x, y)),
        None => println!("{TILT_REST}"),
    }
}

pub async fn bundle(site_dir: &Path, out: &Path) -> Result<()> {
    let mut files = Vec::with_capacity(SITE_FILES.len());
    for name in SITE_FILES {
        let path = site_dir.join(name);
        match tokio::fs::read(&path).await {
            Ok(contents) => files.push(SiteFile::new(name, contents)),
            Err(e) => {
                let reason = format!("{name} could not be read");
                println!("{}", bundle_failed_status(&reason));
                return Err(e).with_context(|| format!("Failed to read {}", path.display()));
            }
        }
    }

    let archive = bundle_site(&files)?;
    let path = out.join(SITE_ARCHIVE_NAME);
    tokio::fs::write(&path, &archive)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = archive.len(), "Bundled site");
    println!("{}", bundle_ready_status());
    Ok(())
}
