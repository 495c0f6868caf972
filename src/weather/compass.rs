/*
 *  weather/compass.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  16 point compass rose shared by every weather source
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Compass points, clockwise from due north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinal {
    N, NNE, NE, ENE, E, ESE, SE, SSE,
    S, SSW, SW, WSW, W, WNW, NW, NNW,
}

const COMPASS_POINTS: [Cardinal; 16] = [
    Cardinal::N,  Cardinal::NNE, Cardinal::NE, Cardinal::ENE,
    Cardinal::E,  Cardinal::ESE, Cardinal::SE, Cardinal::SSE,
    Cardinal::S,  Cardinal::SSW, Cardinal::SW, Cardinal::WSW,
    Cardinal::W,  Cardinal::WNW, Cardinal::NW, Cardinal::NNW,
];

/// Width of one compass sector in degrees.
const SECTOR_DEG: f64 = 360.0 / 16.0;

impl Cardinal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cardinal::N => "N",
            Cardinal::NNE => "NNE",
            Cardinal::NE => "NE",
            Cardinal::ENE => "ENE",
            Cardinal::E => "E",
            Cardinal::ESE => "ESE",
            Cardinal::SE => "SE",
            Cardinal::SSE => "SSE",
            Cardinal::S => "S",
            Cardinal::SSW => "SSW",
            Cardinal::SW => "SW",
            Cardinal::WSW => "WSW",
            Cardinal::W => "W",
            Cardinal::WNW => "WNW",
            Cardinal::NW => "NW",
            Cardinal::NNW => "NNW",
        }
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wind direction degree to compass point.
///
/// `index = round(degree / 22.5) mod 16`. Exact sector boundaries round to
/// the even index, so 11.25° is N and 348.75° wraps to N.
pub fn cardinal_direction(degree: f64) -> Cardinal {
    let ix = (degree / SECTOR_DEG).round_ties_even() as i64;
    COMPASS_POINTS[ix.rem_euclid(16) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinal_fixed_points() {
        assert_eq!(cardinal_direction(0.0), Cardinal::N);
        assert_eq!(cardinal_direction(90.0), Cardinal::E);
        assert_eq!(cardinal_direction(180.0), Cardinal::S);
        assert_eq!(cardinal_direction(270.0), Cardinal::W);
        assert_eq!(cardinal_direction(110.0), Cardinal::ESE);
        assert_eq!(cardinal_direction(22.5), Cardinal::NNE);
    }

    #[test]
    fn test_cardinal_wraps_to_north() {
        for deg in [348.75, 350.0, 355.5, 359.99] {
            assert_eq!(cardinal_direction(deg), Cardinal::N, "{deg}");
        }
        assert_eq!(cardinal_direction(360.0), Cardinal::N);
        assert_eq!(cardinal_direction(348.7), Cardinal::NNW);
    }

    #[test]
    fn test_cardinal_every_degree_is_labelled() {
        let labels: Vec<&str> = COMPASS_POINTS.iter().map(|c| c.as_str()).collect();
        let mut deg = 0.0;
        while deg < 360.0 {
            let c = cardinal_direction(deg);
            assert!(labels.contains(&c.as_str()));
            deg += 0.25;
        }
    }

    #[test]
    fn test_cardinal_boundaries_round_to_even() {
        assert_eq!(cardinal_direction(11.25), Cardinal::N);
        assert_eq!(cardinal_direction(33.75), Cardinal::NE);
    }
}
