//! Output sinks for rendered glyph grids
//!
//! The conversion result is a plain 2D character grid; how it reaches the
//! user is pluggable. Two sinks are provided: the console (one glyph plus a
//! spacer per cell, to compensate for character cells being taller than
//! wide) and a standalone HTML page in a monospace font.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::MosaicError;

/// A destination for a rendered glyph grid
pub trait AsciiOutput {
    fn write(&self, grid: &[Vec<char>]) -> Result<(), MosaicError>;
}

/// Prints the grid to stdout
#[derive(Debug, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }

    fn write_to(&self, grid: &[Vec<char>], out: &mut impl Write) -> io::Result<()> {
        for row in grid {
            for &c in row {
                write!(out, "{c} ")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

impl AsciiOutput for ConsoleOutput {
    fn write(&self, grid: &[Vec<char>]) -> Result<(), MosaicError> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write_to(grid, &mut lock)?;
        Ok(())
    }
}

/// Writes the grid as an HTML page
#[derive(Debug)]
pub struct HtmlOutput {
    path: PathBuf,
    font_family: String,
}

impl HtmlOutput {
    pub fn new(path: impl Into<PathBuf>, font_family: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            font_family: font_family.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn escape(c: char) -> String {
        match c {
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '&' => "&amp;".to_string(),
            ' ' => "&nbsp;".to_string(),
            other => other.to_string(),
        }
    }
}

impl AsciiOutput for HtmlOutput {
    fn write(&self, grid: &[Vec<char>]) -> Result<(), MosaicError> {
        let file = File::create(&self.path)?;
        let mut out = BufWriter::new(file);

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html><head><meta charset=\"utf-8\"></head><body>")?;
        writeln!(
            out,
            "<p style=\"font-family: '{}'; font-size: 10px; line-height: 10px; letter-spacing: 3px;\">",
            self.font_family
        )?;
        for row in grid {
            let line: String = row.iter().map(|&c| Self::escape(c)).collect();
            writeln!(out, "{line}<br>")?;
        }
        writeln!(out, "</p></body></html>")?;
        out.flush()?;
        Ok(())
    }
}
