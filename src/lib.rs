//! DeskMixer controller firmware for RP2040.
//!
//! This crate wires the platform-agnostic engine from `mixer-core` to the
//! board: ADC sliders, GPIO buttons, and a buffered UART to the host.

#![no_std]

// Re-export core types for convenience
pub use mixer_core::{
    Activity, ConfigError, InputBank, IoSerial, MixerController, SerialError, SerialPort, Timing,
};
pub use mixer_proto::{DeviceDescriptor, LabelStyle};

pub mod board;
pub mod config;

pub use board::PanelInputs;
