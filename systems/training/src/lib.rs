#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic training system that ripens enabled rooms into connected
//! ones.
//!
//! The system tracks every room it sees enabled, accrues training progress
//! as simulated time advances, and emits progress updates followed by the
//! trained and connected transitions once a room finishes. Rooms are always
//! visited in coordinate order so replays produce identical command
//! streams.

use std::collections::BTreeMap;

use signal_maze_core::{Command, Event, RoomCoords};

/// Configuration parameters required to construct the training system.
#[derive(Clone, Copy, Debug)]
pub struct Config {
    progress_per_second: f32,
}

impl Config {
    /// Creates a new configuration using the provided training rate.
    #[must_use]
    pub const fn new(progress_per_second: f32) -> Self {
        Self {
            progress_per_second,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(0.25)
    }
}

/// Pure system that trains rooms over simulated time.
#[derive(Debug)]
pub struct Training {
    progress_per_second: f32,
    in_progress: BTreeMap<RoomCoords, f32>,
}

impl Training {
    /// Creates a new training system using the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            progress_per_second: config.progress_per_second,
            in_progress: BTreeMap::new(),
        }
    }

    /// Number of rooms currently being trained.
    #[must_use]
    pub fn rooms_in_training(&self) -> usize {
        self.in_progress.len()
    }

    /// Consumes events to emit progress updates and completion commands.
    pub fn handle(&mut self, events: &[Event], out: &mut Vec<Command>) {
        let mut elapsed_seconds = 0.0f32;
        for event in events {
            match event {
                Event::RoomEnabled { coords } => {
                    let _ = self.in_progress.entry(*coords).or_insert(0.0);
                }
                Event::RoomDisabled { coords } | Event::RoomConnected { coords } => {
                    let _ = self.in_progress.remove(coords);
                }
                Event::TimeAdvanced { dt } => {
                    elapsed_seconds += dt.as_secs_f32();
                }
                _ => {}
            }
        }

        if elapsed_seconds <= 0.0 || self.progress_per_second <= 0.0 {
            return;
        }

        let gained = elapsed_seconds * self.progress_per_second;
        let mut finished = Vec::new();
        for (&coords, progress) in &mut self.in_progress {
            *progress = (*progress + gained).min(1.0);
            out.push(Command::SetRoomTrainingProgress {
                coords,
                progress: *progress,
            });
            if *progress >= 1.0 {
                out.push(Command::SetRoomTrained { coords });
                finished.push(coords);
            }
        }
        for coords in finished {
            let _ = self.in_progress.remove(&coords);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn enabled(x: i32, y: i32) -> Event {
        Event::RoomEnabled {
            coords: RoomCoords::new(x, y),
        }
    }

    fn advanced(millis: u64) -> Event {
        Event::TimeAdvanced {
            dt: Duration::from_millis(millis),
        }
    }

    #[test]
    fn progress_accrues_with_time() {
        let mut training = Training::new(Config::new(0.5));
        let mut commands = Vec::new();

        training.handle(&[enabled(0, 0)], &mut commands);
        assert!(commands.is_empty());
        assert_eq!(training.rooms_in_training(), 1);

        training.handle(&[advanced(1000)], &mut commands);
        assert_eq!(
            commands,
            vec![Command::SetRoomTrainingProgress {
                coords: RoomCoords::new(0, 0),
                progress: 0.5,
            }]
        );
    }

    #[test]
    fn finished_rooms_emit_trained_and_leave_training() {
        let mut training = Training::new(Config::new(1.0));
        let mut commands = Vec::new();

        training.handle(&[enabled(0, 0), advanced(1500)], &mut commands);
        assert_eq!(
            commands,
            vec![
                Command::SetRoomTrainingProgress {
                    coords: RoomCoords::new(0, 0),
                    progress: 1.0,
                },
                Command::SetRoomTrained {
                    coords: RoomCoords::new(0, 0),
                },
            ]
        );
        assert_eq!(training.rooms_in_training(), 0);
    }

    #[test]
    fn rooms_are_visited_in_coordinate_order() {
        let mut training = Training::new(Config::new(0.25));
        let mut commands = Vec::new();

        training.handle(
            &[enabled(1, 0), enabled(-1, 2), enabled(0, 0), advanced(400)],
            &mut commands,
        );
        let visited: Vec<RoomCoords> = commands
            .iter()
            .map(|command| match command {
                Command::SetRoomTrainingProgress { coords, .. } => *coords,
                other => panic!("unexpected command {other:?}"),
            })
            .collect();
        assert_eq!(
            visited,
            vec![
                RoomCoords::new(-1, 2),
                RoomCoords::new(0, 0),
                RoomCoords::new(1, 0),
            ]
        );
    }

    #[test]
    fn disabled_and_connected_rooms_stop_training() {
        let mut training = Training::new(Config::new(0.25));
        let mut commands = Vec::new();

        training.handle(&[enabled(0, 0), enabled(1, 0)], &mut commands);
        training.handle(
            &[
                Event::RoomDisabled {
                    coords: RoomCoords::new(0, 0),
                },
                Event::RoomConnected {
                    coords: RoomCoords::new(1, 0),
                },
            ],
            &mut commands,
        );
        assert_eq!(training.rooms_in_training(), 0);

        training.handle(&[advanced(1000)], &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn zero_rate_never_makes_progress() {
        let mut training = Training::new(Config::new(0.0));
        let mut commands = Vec::new();
        training.handle(&[enabled(0, 0), advanced(10_000)], &mut commands);
        assert!(commands.is_empty());
        assert_eq!(training.rooms_in_training(), 1);
    }
}
