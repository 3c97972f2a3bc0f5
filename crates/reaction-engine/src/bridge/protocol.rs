//! Flat frame buffer shared with the scene layer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Sounds: max_sounds × 1 float]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header on every flush.
//! TypeScript reads them from the header to compute offsets dynamically.

use crate::api::lab::LabConfig;
use crate::api::types::{LabEvent, SoundEvent};
use crate::reaction::tally::ZoneMode;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_PROTOCOL_VERSION: usize = 0;
pub const HEADER_FLUSH_COUNTER: usize = 1;
pub const HEADER_MAX_SOUNDS: usize = 2;
pub const HEADER_SOUND_COUNT: usize = 3;
pub const HEADER_MAX_EVENTS: usize = 4;
pub const HEADER_EVENT_COUNT: usize = 5;
pub const HEADER_ZONE_MODE: usize = 6;
pub const HEADER_TALLY_TOTAL: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per lab event: kind, a, b, c (fixed wire format).
pub const EVENT_FLOATS: usize = LabEvent::FLOATS;

/// Per-flush values written into the header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameHeader {
    pub flush_counter: u32,
    pub zone_mode: ZoneMode,
    pub tally_total: u32,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum sound events per flush.
    pub max_sounds: usize,
    /// Maximum lab events per flush.
    pub max_events: usize,

    /// Size of sound data section in floats.
    pub sound_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where sound data begins.
    pub sound_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_sounds: usize, max_events: usize) -> Self {
        let sound_data_floats = max_sounds;
        let event_data_floats = max_events * EVENT_FLOATS;

        let sound_data_offset = HEADER_FLOATS;
        let event_data_offset = sound_data_offset + sound_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;
        let buffer_total_bytes = buffer_total_floats * 4;

        Self {
            max_sounds,
            max_events,
            sound_data_floats,
            event_data_floats,
            sound_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes,
        }
    }

    /// Compute layout from a LabConfig.
    pub fn from_config(config: &LabConfig) -> Self {
        Self::new(config.max_sounds, config.max_events)
    }

    /// Pack one flush into `buf`, resizing it to the full layout.
    /// Sounds and events beyond capacity are truncated.
    pub fn write_frame(
        &self,
        buf: &mut Vec<f32>,
        header: &FrameHeader,
        sounds: &[SoundEvent],
        events: &[LabEvent],
    ) {
        buf.clear();
        buf.resize(self.buffer_total_floats, 0.0);

        let sounds = &sounds[..sounds.len().min(self.max_sounds)];
        let events = &events[..events.len().min(self.max_events)];

        buf[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        buf[HEADER_FLUSH_COUNTER] = header.flush_counter as f32;
        buf[HEADER_MAX_SOUNDS] = self.max_sounds as f32;
        buf[HEADER_SOUND_COUNT] = sounds.len() as f32;
        buf[HEADER_MAX_EVENTS] = self.max_events as f32;
        buf[HEADER_EVENT_COUNT] = events.len() as f32;
        buf[HEADER_ZONE_MODE] = header.zone_mode.as_f32();
        buf[HEADER_TALLY_TOTAL] = header.tally_total as f32;

        for (slot, sound) in buf[self.sound_data_offset..].iter_mut().zip(sounds) {
            *slot = sound.0 as f32;
        }

        let event_floats: &[f32] = bytemuck::cast_slice(events);
        buf[self.event_data_offset..self.event_data_offset + event_floats.len()]
            .copy_from_slice(event_floats);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> FrameHeader {
        FrameHeader {
            flush_counter: 3,
            zone_mode: ZoneMode::AccumulatingReactants,
            tally_total: 2,
        }
    }

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&LabConfig::default());
        assert_eq!(layout.sound_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 32);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 32 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn custom_capacities() {
        let layout = ProtocolLayout::new(4, 2);
        assert_eq!(layout.sound_data_floats, 4);
        assert_eq!(layout.event_data_floats, 8);
        assert_eq!(layout.buffer_total_floats, 8 + 4 + 8);
    }

    #[test]
    fn write_frame_packs_header_sounds_and_events() {
        let layout = ProtocolLayout::new(4, 2);
        let mut buf = Vec::new();
        let events = [LabEvent::new(1.0, 2.0, 3.0, 4.0)];
        layout.write_frame(&mut buf, &header(), &[SoundEvent(5)], &events);

        assert_eq!(buf.len(), layout.buffer_total_floats);
        assert_eq!(buf[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(buf[HEADER_FLUSH_COUNTER], 3.0);
        assert_eq!(buf[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(buf[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(buf[HEADER_ZONE_MODE], 1.0);
        assert_eq!(buf[HEADER_TALLY_TOTAL], 2.0);
        assert_eq!(buf[layout.sound_data_offset], 5.0);
        let ev = layout.event_data_offset;
        assert_eq!(&buf[ev..ev + 4], &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(&buf[ev + 4..ev + 8], &[0.0; 4]);
    }

    #[test]
    fn write_frame_truncates_overflow() {
        let layout = ProtocolLayout::new(1, 1);
        let mut buf = Vec::new();
        let events = [LabEvent::with_value(1.0, 1.0), LabEvent::with_value(2.0, 2.0)];
        layout.write_frame(&mut buf, &header(), &[SoundEvent(1), SoundEvent(2)], &events);
        assert_eq!(buf.len(), layout.buffer_total_floats);
        assert_eq!(buf[HEADER_SOUND_COUNT], 1.0);
        assert_eq!(buf[HEADER_EVENT_COUNT], 1.0);
        assert_eq!(buf[layout.event_data_offset], 1.0);
    }
}
