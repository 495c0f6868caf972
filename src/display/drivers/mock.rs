/*
 *  display/drivers/mock.rs
 *
 *  wxpaper - weather on e-paper
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display sink for testing
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

use std::sync::{Arc, Mutex, MutexGuard};

use crate::display::error::DisplayError;
use crate::display::framebuffer::Canvas1Bit;
use crate::display::traits::{check_dimensions, DisplayCapabilities, DisplaySink};

/// Mock display sink
///
/// Simulates a panel without hardware. It records every call and keeps the
/// last frame shown so tests can inspect it through the shared state.
#[derive(Debug, Clone)]
pub struct MockSink {
    /// Display capabilities
    capabilities: DisplayCapabilities,

    /// Shared state for testing
    state: Arc<Mutex<MockSinkState>>,
}

/// Internal state for the mock sink (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockSinkState {
    /// Number of times init() was called
    pub init_count: usize,

    /// Number of successful show() calls
    pub show_count: usize,

    /// Number of times sleep() was called
    pub sleep_count: usize,

    /// Whether the sink is initialized
    pub is_initialized: bool,

    /// Whether the sink is currently asleep
    pub is_asleep: bool,

    /// Copy of the last frame shown
    pub last_frame: Option<Canvas1Bit>,

    /// Simulate failures (for error testing)
    pub simulate_show_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            capabilities: DisplayCapabilities {
                width,
                height,
                supports_sleep: true,
            },
            state: Arc::new(Mutex::new(MockSinkState::default())),
        }
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockSinkState>> {
        Arc::clone(&self.state)
    }

    fn lock(&self) -> MutexGuard<'_, MockSinkState> {
        // a panicking test thread must not hide the state from the next one
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DisplaySink for MockSink {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.init_count += 1;
        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }
        state.is_initialized = true;
        Ok(())
    }

    fn show(&mut self, canvas: &Canvas1Bit) -> Result<(), DisplayError> {
        check_dimensions(&*self, canvas)?;
        let mut state = self.lock();
        if !state.is_initialized {
            return Err(DisplayError::NotInitialized);
        }
        if state.simulate_show_failure {
            return Err(DisplayError::SpiError("Simulated show failure".to_string()));
        }
        state.is_asleep = false;
        state.show_count += 1;
        state.last_frame = Some(canvas.clone());
        Ok(())
    }

    fn sleep(&mut self) -> Result<(), DisplayError> {
        let mut state = self.lock();
        state.sleep_count += 1;
        state.is_asleep = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_records_calls() {
        let mut sink = MockSink::new(8, 8);
        let state = sink.state();
        assert!(matches!(sink.show(&Canvas1Bit::new(8, 8)), Err(DisplayError::NotInitialized)));

        sink.init().unwrap();
        sink.show(&Canvas1Bit::new(8, 8)).unwrap();
        sink.sleep().unwrap();

        let s = state.lock().unwrap();
        assert_eq!((s.init_count, s.show_count, s.sleep_count), (1, 1, 1));
        assert!(s.is_asleep);
        assert_eq!(s.last_frame.as_ref().map(|c| c.dimensions()), Some((8, 8)));
    }

    #[test]
    fn test_mock_simulated_failures() {
        let mut sink = MockSink::new(8, 8);
        sink.state().lock().unwrap().simulate_init_failure = true;
        assert!(sink.init().is_err());

        let mut sink = MockSink::new(8, 8);
        sink.init().unwrap();
        sink.state().lock().unwrap().simulate_show_failure = true;
        assert!(sink.show(&Canvas1Bit::new(8, 8)).is_err());
        assert_eq!(sink.state().lock().unwrap().show_count, 0);
    }
}
