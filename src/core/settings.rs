// Copyright @yucwang 2026

use crate::error::{PavlovaError, Result};
use crate::integrators::path::PathSettings;

pub const USAGE: &str = "<output.exr> [--spp N] [--max-depth N] [--seed N] [--width N] [--height N] [--rr-depth N|off] [--no-specular-tracking]";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub output_path: String,
    pub width: usize,
    pub height: usize,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub seed: u64,
    pub russian_roulette_depth: Option<u32>,
    pub track_specular: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            output_path: String::from("pavlova.exr"),
            width: 256,
            height: 256,
            samples_per_pixel: 16,
            max_depth: 8,
            seed: 0,
            russian_roulette_depth: Some(0),
            track_specular: true,
        }
    }
}

fn parse_value<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T> {
    let value = value.ok_or_else(|| PavlovaError::InvalidArgument(format!("{} expects a value", flag)))?;
    value.parse::<T>()
        .map_err(|_| PavlovaError::InvalidArgument(format!("{} got an invalid value: {}", flag, value)))
}

impl RenderSettings {
    /// Parse command line arguments, program name excluded.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let mut settings = Self::default();
        let mut output_path: Option<String> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--spp" => {
                    i += 1;
                    settings.samples_per_pixel = parse_value("--spp", args.get(i))?;
                }
                "--max-depth" => {
                    i += 1;
                    settings.max_depth = parse_value("--max-depth", args.get(i))?;
                }
                "--seed" => {
                    i += 1;
                    settings.seed = parse_value("--seed", args.get(i))?;
                }
                "--width" => {
                    i += 1;
                    settings.width = parse_value("--width", args.get(i))?;
                }
                "--height" => {
                    i += 1;
                    settings.height = parse_value("--height", args.get(i))?;
                }
                "--rr-depth" => {
                    i += 1;
                    settings.russian_roulette_depth = match args.get(i).map(|s| s.as_str()) {
                        Some("off") => None,
                        _ => Some(parse_value("--rr-depth", args.get(i))?),
                    };
                }
                "--no-specular-tracking" => {
                    settings.track_specular = false;
                }
                flag if flag.starts_with("--") => {
                    return Err(PavlovaError::InvalidArgument(format!("unknown flag {}", flag)));
                }
                path => {
                    if output_path.is_some() {
                        return Err(PavlovaError::InvalidArgument(format!("unexpected argument {}", path)));
                    }
                    output_path = Some(path.to_string());
                }
            }
            i += 1;
        }

        settings.output_path = output_path
            .ok_or_else(|| PavlovaError::InvalidArgument(String::from("missing output path")))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PavlovaError::InvalidSettings(
                format!("image size must be non-zero, got {}x{}", self.width, self.height)));
        }
        if self.samples_per_pixel == 0 {
            return Err(PavlovaError::InvalidSettings(String::from("spp must be at least 1")));
        }
        if self.max_depth == 0 {
            return Err(PavlovaError::InvalidSettings(String::from("max depth must be at least 1")));
        }
        Ok(())
    }

    pub fn path_settings(&self) -> PathSettings {
        PathSettings {
            max_depth: self.max_depth,
            samples_per_pixel: self.samples_per_pixel,
            russian_roulette_depth: self.russian_roulette_depth,
            track_specular: self.track_specular,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_defaults() {
        let settings = RenderSettings::from_args(&args(&["out.exr"])).expect("valid args");
        assert_eq!(settings.output_path, "out.exr");
        assert_eq!(settings.max_depth, RenderSettings::default().max_depth);
        assert!(settings.track_specular);
    }

    #[test]
    fn test_parse_flags() {
        let settings = RenderSettings::from_args(&args(&[
            "--spp", "4", "img.exr", "--max-depth", "2", "--seed", "9",
            "--width", "32", "--height", "16", "--rr-depth", "off", "--no-specular-tracking",
        ])).expect("valid args");
        assert_eq!(settings.samples_per_pixel, 4);
        assert_eq!(settings.max_depth, 2);
        assert_eq!(settings.seed, 9);
        assert_eq!((settings.width, settings.height), (32, 16));
        assert_eq!(settings.russian_roulette_depth, None);
        assert!(!settings.track_specular);

        let path = settings.path_settings();
        assert_eq!(path.max_depth, 2);
        assert_eq!(path.samples_per_pixel, 4);
        assert!(!path.track_specular);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(RenderSettings::from_args(&args(&[])),
                         Err(PavlovaError::InvalidArgument(_))));
        assert!(matches!(RenderSettings::from_args(&args(&["a.exr", "--spp"])),
                         Err(PavlovaError::InvalidArgument(_))));
        assert!(matches!(RenderSettings::from_args(&args(&["a.exr", "--spp", "x"])),
                         Err(PavlovaError::InvalidArgument(_))));
        assert!(matches!(RenderSettings::from_args(&args(&["a.exr", "--bogus"])),
                         Err(PavlovaError::InvalidArgument(_))));
        assert!(matches!(RenderSettings::from_args(&args(&["a.exr", "--max-depth", "0"])),
                         Err(PavlovaError::InvalidSettings(_))));
        assert!(matches!(RenderSettings::from_args(&args(&["a.exr", "--width", "0"])),
                         Err(PavlovaError::InvalidSettings(_))));
    }
}
