//! Initialize a dashboard project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing webembed...");

    let root = config_path.parent().unwrap_or_else(|| Path::new(""));
    let created = scaffold(root, config_path, yes)?;

    if created == 0 {
        tracing::warn!("Nothing to do, all files exist. Use --yes to overwrite.");
        return Ok(());
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'webembed build' to generate the C source.");

    Ok(())
}

/// Write the default config and starter assets, returning how many files were written.
fn scaffold(root: &Path, config_path: &Path, overwrite: bool) -> Result<usize> {
    let web_dir = root.join("web");
    fs::create_dir_all(&web_dir).context("Failed to create web directory")?;

    let files = [
        (config_path.to_path_buf(), DEFAULT_CONFIG),
        (web_dir.join("dashboard.html"), DEFAULT_TEMPLATE),
        (web_dir.join("dashboard.css"), DEFAULT_CSS),
        (web_dir.join("dashboard.js"), DEFAULT_JS),
    ];

    let mut created = 0;
    for (path, contents) in files {
        if path.exists() && !overwrite {
            tracing::debug!("Keeping existing {}", path.display());
            continue;
        }
        fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created {}", path.display());
        created += 1;
    }

    Ok(created)
}

const DEFAULT_CONFIG: &str = r#"# webembed configuration

[assets]
# HTML template containing {{INLINE_CSS}} and {{INLINE_JS}}
template = "web/dashboard.html"
stylesheet = "web/dashboard.css"
script = "web/dashboard.js"

[output]
# Generated C file, overwritten on every build
path = "src/dashboard_embedded.c"
header = "dashboard.h"
array = "s_html"
content_fn = "dashboard_get_html"
len_fn = "dashboard_get_html_len"

[encoding]
# Longest string literal segment, in escaped characters
chunk_size = 2000
# "truncate" keeps only the low byte of code points above U+FFFF,
# "universal" writes them as \U escapes
astral = "truncate"
"#;

const DEFAULT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Dashboard</title>
  <style>{{INLINE_CSS}}</style>
</head>
<body>
  <header><h1>Dashboard</h1><span id="status">connecting</span></header>
  <main id="readings"></main>
  <script>{{INLINE_JS}}</script>
</body>
</html>
"##;

const DEFAULT_CSS: &str = r#"* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, sans-serif;
  background: #10141a;
  color: #e6e6e6;
}

header {
  display: flex;
  justify-content: space-between;
  align-items: center;
  padding: 0.75rem 1rem;
  background: #1b222c;
}

#readings {
  display: grid;
  grid-template-columns: repeat(auto-fill, minmax(10rem, 1fr));
  gap: 1rem;
  padding: 1rem;
}

.card {
  padding: 1rem;
  border-radius: 0.5rem;
  background: #1b222c;
}
"#;

const DEFAULT_JS: &str = r#"(function () {
  'use strict';

  const status = document.getElementById('status');
  const readings = document.getElementById('readings');

  async function refresh() {
    try {
      const res = await fetch('/api/readings');
      const data = await res.json();
      readings.innerHTML = '';
      for (const [name, value] of Object.entries(data)) {
        const card = document.createElement('div');
        card.className = 'card';
        card.textContent = name + ': ' + value;
        readings.appendChild(card);
      }
      status.textContent = 'online';
    } catch (err) {
      status.textContent = 'offline';
    }
  }

  refresh();
  setInterval(refresh, 5000);
})();
"#;
