use crate::foundation::error::{WarmingError, WarmingResult};

const YLORRD: &[&str] = &[
    "#ffffcc", "#ffeda0", "#fed976", "#feb24c", "#fd8d3c", "#fc4e2a", "#e31a1c", "#bd0026",
    "#800026",
];
const REDS: &[&str] = &[
    "#fff5f0", "#fee0d2", "#fcbba1", "#fc9272", "#fb6a4a", "#ef3b2c", "#cb181d", "#a50f15",
    "#67000d",
];
const GREYS: &[&str] = &[
    "#ffffff", "#f0f0f0", "#d9d9d9", "#bdbdbd", "#969696", "#737373", "#525252", "#252525",
    "#000000",
];

/// Names accepted by [`Colormap::parse`].
pub const NAMED_RAMPS: &[&str] = &["ylorrd", "reds", "greys"];

/// 256-entry RGB palette indexed by quantized byte value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Colormap {
    name: String,
    entries: Vec<[u8; 3]>,
}

impl Colormap {
    /// Resolve a ramp name, or a comma-separated list of at least two `#RRGGBB` stops.
    pub fn parse(spec: &str) -> WarmingResult<Self> {
        let spec = spec.trim();
        let stops = match spec.to_ascii_lowercase().as_str() {
            "ylorrd" => parse_stops(YLORRD)?,
            "reds" => parse_stops(REDS)?,
            "greys" => parse_stops(GREYS)?,
            _ if spec.contains('#') => {
                let parts: Vec<&str> = spec.split(',').collect();
                parse_stops(&parts)?
            }
            other => {
                return Err(WarmingError::validation(format!(
                    "unknown colormap \"{other}\" (known: {})",
                    NAMED_RAMPS.join(", ")
                )));
            }
        };
        Ok(Self {
            name: spec.to_owned(),
            entries: interpolate(&stops),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[[u8; 3]] {
        &self.entries
    }

    pub fn color(&self, index: u8) -> [u8; 3] {
        self.entries[usize::from(index)]
    }

    /// TIFF `ColorMap` layout: all reds, then greens, then blues, each scaled to 16 bits.
    pub fn to_tiff_colormap(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(3 * 256);
        for channel in 0..3 {
            out.extend(self.entries.iter().map(|c| u16::from(c[channel]) * 257));
        }
        out
    }
}

fn parse_stops(stops: &[&str]) -> WarmingResult<Vec<[u8; 3]>> {
    if stops.len() < 2 {
        return Err(WarmingError::validation(
            "colour ramp needs at least two stops",
        ));
    }
    stops
        .iter()
        .map(|s| parse_hex(s).map_err(WarmingError::validation))
        .collect()
}

fn parse_hex(s: &str) -> Result<[u8; 3], String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err(format!("colour stop \"{s}\" must be #RRGGBB"));
    }
    Ok([
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ])
}

fn interpolate(stops: &[[u8; 3]]) -> Vec<[u8; 3]> {
    let segments = (stops.len() - 1) as f64;
    (0..256)
        .map(|i| {
            let t = (i as f64) / 255.0 * segments;
            let k = (t.floor() as usize).min(stops.len() - 2);
            let f = t - k as f64;
            let (a, b) = (stops[k], stops[k + 1]);
            let mut c = [0u8; 3];
            for ch in 0..3 {
                let v = f64::from(a[ch]) + (f64::from(b[ch]) - f64::from(a[ch])) * f;
                c[ch] = v.round().clamp(0.0, 255.0) as u8;
            }
            c
        })
        .collect()
}
