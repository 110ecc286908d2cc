//! CLI command action handlers

use super::{App, ProgressBarSink};
use crate::scanner::{group_by_mod, ScanResult};
use crate::status::display::{label, string_label};
use anyhow::{bail, Result};
use std::collections::BTreeMap;

impl App {
    // ========== Scan Commands ==========

    pub async fn cmd_scan(&mut self, online: bool) -> Result<()> {
        if self.mods.is_empty() {
            let mods_dir = self.config.read().await.mods_dir();
            println!("No mods found in {}.", mods_dir.display());
            return Ok(());
        }

        let progress = ProgressBarSink::new();
        let result = self.scan(online, &progress).await;
        self.print_scan_result(&result);
        Ok(())
    }

    pub async fn cmd_deep_scan(&mut self) -> Result<()> {
        let progress = ProgressBarSink::new();
        let result = self.deep_scan(&progress).await;

        if result.is_empty() {
            println!("No installed translations to check.");
            return Ok(());
        }
        self.print_scan_result(&result);
        Ok(())
    }

    fn print_scan_result(&self, result: &ScanResult) {
        for (mod_name, files) in group_by_mod(result) {
            let rollup = self
                .find_mod(&mod_name)
                .map(|m| m.status())
                .unwrap_or_default();

            println!("{} [{}]", mod_name, label(rollup));
            for (path, status) in files {
                println!("    {:<48} {}", path.display(), label(status));
            }
        }

        println!("{:-<60}", "");
        println!("Scanned {} file(s).", result.len());
    }

    // ========== Translation Commands ==========

    pub async fn cmd_translation_list(&self) -> Result<()> {
        let store = self.store.read().await;

        if let Some(vanilla) = store.vanilla() {
            println!(
                "{} (read-only, {} file(s), {} string(s))",
                vanilla.name,
                vanilla.strings.len(),
                vanilla.string_count()
            );
        }

        if store.user_translations().is_empty() {
            println!("No translations installed.");
            return Ok(());
        }

        println!("{:<40} {:<10} {:>6} {:>8}  Status", "Name", "Source", "Files", "Strings");
        println!("{:-<90}", "");
        for t in store.user_translations() {
            println!(
                "{:<40} {:<10} {:>6} {:>8}  {}",
                t.name,
                t.source.as_str(),
                t.strings.len(),
                t.string_count(),
                label(t.status)
            );
        }
        Ok(())
    }

    pub async fn cmd_translation_show(&self, name: &str) -> Result<()> {
        let store = self.store.read().await;
        let Some(t) = store.get(name) else {
            bail!("Translation '{}' not found. Run 'modtranslate translation list'.", name);
        };

        println!("Translation: {}", t.name);
        println!("{:-<40}", "");
        println!("Source:       {}", t.source.as_str());
        if let Some(mod_id) = t.mod_id {
            println!("Mod ID:       {}", mod_id);
        }
        if !t.version.is_empty() {
            println!("Version:      {}", t.version);
        }
        if let Some(mod_id) = t.original_mod_id {
            println!("Original mod: {} ({})", mod_id, t.original_version);
        }
        if let Some(ts) = t.timestamp.and_then(|ts| chrono::DateTime::from_timestamp(ts, 0)) {
            println!("Created:      {}", ts.format("%Y-%m-%d %H:%M"));
        }
        println!("Status:       {}", label(t.status));

        println!();
        println!("Files:");
        for (path, strings) in &t.strings {
            let mut counts: BTreeMap<&'static str, usize> = BTreeMap::new();
            for s in strings {
                *counts.entry(string_label(s.status)).or_default() += 1;
            }
            let summary: Vec<String> = counts
                .iter()
                .map(|(label, n)| format!("{}: {}", label, n))
                .collect();

            println!("  {} ({} string(s))", path.display(), strings.len());
            if !summary.is_empty() {
                println!("    {}", summary.join(", "));
            }
        }
        Ok(())
    }

    pub async fn cmd_translation_create(&mut self, mod_name: &str, complete_only: bool) -> Result<()> {
        let Some(index) = self
            .mods
            .iter()
            .position(|m| m.name == mod_name)
            .or_else(|| {
                self.mods
                    .iter()
                    .position(|m| m.name.eq_ignore_ascii_case(mod_name))
            })
        else {
            bail!("Mod '{}' not found.", mod_name);
        };

        // Statuses come from a fresh scan of this mod only
        let progress = ProgressBarSink::new();
        let result = self
            .scanner
            .basic_scan(std::slice::from_ref(&self.mods[index]), &progress)
            .await;
        crate::state::StateService::apply_scan_result(&mut self.mods, &result);

        let only_complete = complete_only || self.config.read().await.only_complete_coverage;
        let created = self
            .database
            .create_translation_for_mod(&self.mods[index], only_complete)
            .await?;
        self.sync_state();

        match created {
            Some(name) => {
                let store = self.store.read().await;
                let files = store.get(&name).map(|t| t.strings.len()).unwrap_or(0);
                println!("Created translation '{}' covering {} file(s).", name, files);
            }
            None => println!(
                "No file of '{}' can be translated from the database.",
                self.mods[index].name
            ),
        }
        Ok(())
    }

    pub async fn cmd_translation_delete(&mut self, name: &str) -> Result<()> {
        self.database.delete_translation(name).await?;
        let changed = self.sync_state();
        println!("Deleted translation '{}' ({} file status(es) reset).", name, changed);
        Ok(())
    }

    pub async fn cmd_translation_rename(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        self.database.rename_translation(old_name, new_name).await?;
        println!("Renamed '{}' to '{}'.", old_name, new_name.trim());
        Ok(())
    }

    pub async fn cmd_translation_reset_string(
        &mut self,
        name: &str,
        file: &str,
        position: usize,
    ) -> Result<()> {
        self.store
            .write()
            .await
            .reset_string(name, std::path::Path::new(file), position)?;
        println!("Reset string {} of {} in '{}'.", position, file, name);
        Ok(())
    }

    // ========== Masterlist Commands ==========

    pub async fn cmd_masterlist_update(&mut self) -> Result<()> {
        let count = self.update_masterlist().await?;
        println!("Masterlist updated ({} entries).", count);
        Ok(())
    }

    // ========== Config Commands ==========

    pub async fn cmd_config_show(&self) -> Result<()> {
        let config = self.config.read().await;

        println!("Configuration");
        println!("{:-<40}", "");
        println!("Config file:     {}", config.paths.config_file().display());
        println!("Language:        {}", config.language);
        println!("Mods dir:        {}", config.mods_dir().display());
        println!("Dumps dir:       {}", config.dumps_dir().display());
        println!("Translations:    {}", config.translations_dir().display());
        println!("Base game:       {}", config.vanilla_dir().display());
        println!(
            "Masterlist URL:  {}",
            config.masterlist_url.as_deref().unwrap_or("(not set)")
        );
        println!("Complete only:   {}", config.only_complete_coverage);
        if !config.ignore_list.is_empty() {
            println!("Ignored files:   {}", config.ignore_list.join(", "));
        }
        println!("Scan masterlist: {} entries", self.scanner.masterlist().len());
        Ok(())
    }
}
