//! Built-in intent names defined by the voice platform.
//!
//! See the platform's standard built-in intent reference.

/// `AMAZON.CancelIntent`.
pub const CANCEL: &str = "AMAZON.CancelIntent";
/// `AMAZON.HelpIntent`.
pub const HELP: &str = "AMAZON.HelpIntent";
/// `AMAZON.LoopOffIntent`.
pub const LOOP_OFF: &str = "AMAZON.LoopOffIntent";
/// `AMAZON.LoopOnIntent`.
pub const LOOP_ON: &str = "AMAZON.LoopOnIntent";
/// `AMAZON.NextIntent`.
pub const NEXT: &str = "AMAZON.NextIntent";
/// `AMAZON.NoIntent`.
pub const NO: &str = "AMAZON.NoIntent";
/// `AMAZON.PauseIntent`.
pub const PAUSE: &str = "AMAZON.PauseIntent";
/// `AMAZON.PreviousIntent`.
pub const PREVIOUS: &str = "AMAZON.PreviousIntent";
/// `AMAZON.RepeatIntent`.
pub const REPEAT: &str = "AMAZON.RepeatIntent";
/// `AMAZON.ResumeIntent`.
pub const RESUME: &str = "AMAZON.ResumeIntent";
/// `AMAZON.ShuffleOffIntent`.
pub const SHUFFLE_OFF: &str = "AMAZON.ShuffleOffIntent";
/// `AMAZON.ShuffleOnIntent`.
pub const SHUFFLE_ON: &str = "AMAZON.ShuffleOnIntent";
/// `AMAZON.StartOverIntent`.
pub const START_OVER: &str = "AMAZON.StartOverIntent";
/// `AMAZON.StopIntent`.
pub const STOP: &str = "AMAZON.StopIntent";
/// `AMAZON.YesIntent`.
pub const YES: &str = "AMAZON.YesIntent";
