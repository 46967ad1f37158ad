pub mod clipboard;
pub mod context;
pub mod drag;
pub mod editor;
pub mod guides;
pub mod input;
pub mod marquee;
pub mod rotation;
pub mod selection;
pub mod shortcuts;
pub mod snap;
pub mod transform;

pub use clipboard::Clipboard;
pub use context::SceneContext;
pub use drag::{DragCoordinator, DragOutcome};
pub use editor::{Editor, Gesture};
pub use guides::{GuideLine, GuideOrientation, GuideStyle, GuideView};
pub use input::{InputEvent, KeyEvent, Modifiers, PointerButton};
pub use marquee::MarqueeSelector;
pub use rotation::RotationSnapper;
pub use selection::Selection;
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use snap::{AlignmentSnapper, SnapResult};
pub use transform::{TransformFrame, Transformer};
