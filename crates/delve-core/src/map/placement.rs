//! Randomized room placement.
//!
//! Rooms are sampled until their clearance-expanded area covers a target
//! fraction of the usable grid. Candidates that overlap an existing room
//! are rejected and resampled. Sustained rejection streaks first relax
//! the coverage target, then shrink the maximum room size, so placement
//! always terminates; pathological parameters produce a sparser map, not
//! an error.

use crate::rng::DelveRng;

use super::params::{MapParams, MAP_BORDER};
use super::room::{Room, RoomId};

/// Consecutive overlap rejections before the coverage target relaxes.
pub const OVERLAP_RELAX_THRESHOLD: u32 = 10_000;

/// Consecutive overlap rejections before the maximum room size shrinks.
pub const OVERLAP_SHRINK_THRESHOLD: u32 = 100_000;

/// Widest tolerated room width/height ratio.
pub const MAX_ASPECT_RATIO: f64 = 1.6;

const TARGET_FRACTION_START: f64 = 1.0;
const TARGET_FRACTION_FLOOR: f64 = 0.5;
const TARGET_FRACTION_STEP: f64 = 0.01;

/// Generate non-overlapping rooms for a map of `params.map_width`.
///
/// Room ids are provisional insertion indices; the map builder reassigns
/// them after sorting. Never fails: impossible demands degrade the
/// coverage target and room sizes instead.
pub fn place_rooms(params: &MapParams, rng: &mut DelveRng) -> Vec<Room> {
    let usable = params.usable_area() as f64;
    let mut rooms: Vec<Room> = Vec::new();
    let mut covered = 0.0;
    let mut target_fraction = TARGET_FRACTION_START;
    let mut max_size = params.max_room_size;
    let mut rejections: u32 = 0;

    while covered < target_fraction * usable {
        let w = rng.between(params.min_room_size, max_size);
        let h = rng.between(params.min_room_size, max_size);
        let aspect = w.max(h) as f64 / w.min(h) as f64;
        if aspect > MAX_ASPECT_RATIO {
            continue;
        }

        let max_x = params.map_width - MAP_BORDER - w;
        let max_y = params.map_width - MAP_BORDER - h;
        let candidate = if max_x < MAP_BORDER || max_y < MAP_BORDER {
            // Sampled size does not fit inside the border at all; let the
            // rejection policy shrink the size range.
            None
        } else {
            let x = rng.between(MAP_BORDER, max_x);
            let y = rng.between(MAP_BORDER, max_y);
            let room = Room::new(RoomId(rooms.len()), x, y, w, h);
            if rooms
                .iter()
                .any(|placed| placed.overlaps(&room, params.min_clearance))
            {
                None
            } else {
                Some(room)
            }
        };

        match candidate {
            Some(room) => {
                covered += room.cleared_area(params.min_clearance) as f64;
                rooms.push(room);
                rejections = 0;
            }
            None => {
                rejections += 1;
                if rejections >= OVERLAP_SHRINK_THRESHOLD {
                    if max_size > params.min_room_size + 1 {
                        max_size -= 1;
                        tracing::debug!(max_size, "room placement starving, max size shrunk");
                    } else if target_fraction <= TARGET_FRACTION_FLOOR {
                        // Both knobs are at their floor and nothing fits;
                        // accept the density we reached.
                        tracing::warn!(
                            rooms = rooms.len(),
                            covered,
                            "room placement gave up below the coverage floor"
                        );
                        break;
                    }
                    rejections = 0;
                } else if rejections % OVERLAP_RELAX_THRESHOLD == 0 {
                    target_fraction =
                        (target_fraction - TARGET_FRACTION_STEP).max(TARGET_FRACTION_FLOOR);
                    tracing::debug!(target_fraction, "room placement coverage target relaxed");
                }
            }
        }
    }

    rooms
}
