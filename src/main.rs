/*
 * strmatch - STR Profile Matching Tool
 *
 * Copyright (c) 2025 Yumi Sims, Wellcome Sanger Institute
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use strmatch::{read_sample, ProfileTable};

struct Config {
    table_path: PathBuf,
    sample_path: PathBuf,
}

impl Config {
    fn from_args(args: &[String]) -> Option<Self> {
        match args {
            [_, table, sample] => Some(Self {
                table_path: PathBuf::from(table),
                sample_path: PathBuf::from(sample),
            }),
            _ => None,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let Some(config) = Config::from_args(&args) else {
        let program = args.first().map_or("strmatch", String::as_str);
        eprintln!("Usage: {} <profiles.csv> <sample>", program);
        eprintln!("Example: {} databases/large.csv sequences/5.txt", program);
        std::process::exit(1);
    };

    let table = ProfileTable::from_path(&config.table_path).with_context(|| {
        format!("Failed to load profile table {}", config.table_path.display())
    })?;
    let sample = read_sample(&config.sample_path)
        .with_context(|| format!("Failed to read sample {}", config.sample_path.display()))?;
    info!(
        "analysing {} bp from {}",
        sample.len(),
        config.sample_path.display()
    );

    let result = table
        .identify(&sample)
        .context("Profile table is inconsistent with its marker list")?;
    println!("{}", result);

    Ok(())
}
