use std::io::Write;

use km_core::errors::*;
use km_core::k8s::{
    self,
    AppGateway,
};
use km_core::prelude::*;
use tabwriter::TabWriter;

const HEADERS: [&str; 4] = ["NAME", "VERSION", "CURRENT STATUS", "UPDATE AVAILABLE"];
const COLUMN_GAP: usize = 3;

fn row_for(app: &App) -> [String; 4] {
    let status = app.status.clone().unwrap_or_default();
    let update = if status.new_update_available {
        format!("yes ({})", status.new_update_version)
    } else {
        "no".into()
    };
    [app.name_any(), status.installed_version, status.last_status, update]
}

pub fn render_table(apps: &[App]) -> anyhow::Result<String> {
    if apps.is_empty() {
        return Ok("No resources found".into());
    }

    let mut tw = TabWriter::new(vec![]).minwidth(0).padding(COLUMN_GAP);
    writeln!(tw, "{}", HEADERS.join("\t"))?;
    for app in apps {
        writeln!(tw, "{}", row_for(app).join("\t"))?;
    }
    tw.flush()?;

    let table = tw.into_inner().map_err(|_| anyhow!("unable to render installed apps table"))?;
    Ok(String::from_utf8(table)?.trim_end().into())
}

pub async fn cmd(client: kube::Client) -> EmptyResult {
    k8s::require_app_crd(&client).await?;
    let apps = AppGateway::new(client).list().await?;
    println!("{}", render_table(&apps)?);
    Ok(())
}
