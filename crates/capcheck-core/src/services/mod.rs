//! Core services - assembly, evaluation and agent-facing orchestration.
//!
//! Services are pure orchestrators over ports. They hold no concrete
//! transport, host or storage implementations.

mod assembler;
mod capability_service;
mod evaluator;

pub use assembler::{AssemblerDeps, SnapshotAssembler};
pub use capability_service::CapabilityService;
pub use evaluator::{
    CRITERION_COUNTRY, CRITERION_CPU_CORES, CRITERION_INTERNET_SPEED, CRITERION_MICROPHONE,
    CRITERION_RAM, CRITERION_SCREEN_HEIGHT, CRITERION_SCREEN_WIDTH, CRITERION_VPN,
    CRITERION_WEBCAM, EvaluationPolicy, RequirementEvaluator, UnknownRamPolicy, evaluate,
};
