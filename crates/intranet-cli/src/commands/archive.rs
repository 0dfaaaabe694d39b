use std::path::Path;

use anyhow::{Context as _, Result};
use intranet_core::state::ExportFormat;
use tracing::info;

use super::Context;

pub async fn export(ctx: &Context, dir: &Path, base64: bool) -> Result<()> {
    let artifact = if base64 {
        ctx.tab.export_as(ExportFormat::Base64)?
    } else {
        ctx.tab.export_blob()?
    };

    let path = dir.join(&artifact.file_name);
    tokio::fs::write(&path, &artifact.contents)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), "Exported state");
    println!("{}", path.display());
    Ok(())
}

pub async fn import(ctx: &mut Context, file: &Path) -> Result<()> {
    ctx.require_dashboard().await?;
    let raw = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    match ctx.tab.import_blob(&raw).await {
        Ok(()) => {
            println!("Import complete.");
            Ok(())
        }
        Err(e) if e.is_invalid_import() => anyhow::bail!(e.user_message()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::ConsoleSink;
    use intranet_core::state::Command;

    async fn open(dir: &Path) -> Context {
        Context::open(
            Some(dir.join("config.toml")),
            Some(dir.join("storage.json")),
            ConsoleSink::quiet(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_import_requires_dashboard() {
        let dir = tempfile::tempdir().unwrap();
        let mut ctx = open(dir.path()).await;

        let artifact = ctx.tab.export_blob().unwrap();
        let file = dir.path().join(&artifact.file_name);
        tokio::fs::write(&file, &artifact.contents).await.unwrap();

        ctx.tab.login("CHIEF-01").await.unwrap();
        ctx.tab.accept_protocols().await.unwrap();
        ctx.tab.dispatch(Command::RemoveAgent { index: 0 }).await.unwrap();
        ctx.tab.logout().await.unwrap();

        assert!(import(&mut ctx, &file).await.is_err());
        assert_eq!(ctx.tab.state().agents.len(), 2);

        ctx.tab.login("CHIEF-01").await.unwrap();
        assert!(import(&mut ctx, &file).await.is_err());
        ctx.tab.accept_protocols().await.unwrap();
        import(&mut ctx, &file).await.unwrap();
        assert_eq!(ctx.tab.state().agents.len(), 3);
    }
}
