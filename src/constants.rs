//! Centralised tuning constants for the drop effect.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::DropConfig`] mirrors every constant and can overwrite any
//! subset from `assets/freefall.toml`; this file remains the authoritative
//! default source.

// ── Window ───────────────────────────────────────────────────────────────────

/// Initial window width (logical pixels).
pub const WINDOW_WIDTH: u32 = 1280;

/// Initial window height (logical pixels).
pub const WINDOW_HEIGHT: u32 = 800;

// ── Physics: World ───────────────────────────────────────────────────────────

/// Downward gravity in page space (px/s²).  Page space is y-down, so gravity
/// is positive.
///
/// Higher values → snappier falls, harder landings.  At 1400 a card released
/// near the top of a ~650 px container settles in roughly a second.
pub const GRAVITY_PX: f32 = 1400.0;

/// Thickness of the static boundary walls (px).
///
/// The original page used 1 px walls; without continuous collision detection
/// a fast body can tunnel through statics that thin.  Walls are therefore
/// thick cuboids whose *inner* faces sit exactly on the container edges, so
/// the visible bounds are unchanged.
pub const WALL_THICKNESS: f32 = 60.0;

// ── Physics: Held-page parameter set ─────────────────────────────────────────
// Values carried over from the click-toggle page.  The two pages were tuned
// independently; both sets are preserved rather than reconciled.

/// Contact friction for the pill-shaped cards (buttons).
pub const PILL_FRICTION: f32 = 0.5;

/// Restitution for the pill-shaped cards.
pub const PILL_RESTITUTION: f32 = 0.5;

/// Contact friction for plain rectangle and circle cards.
pub const PLAIN_FRICTION: f32 = 0.1;

/// Restitution for plain rectangle and circle cards.
pub const PLAIN_RESTITUTION: f32 = 0.3;

/// Angular damping for plain cards; keeps the portrait and the discs from
/// spinning off wildly after the first bounce.
pub const PLAIN_ANGULAR_DAMPING: f32 = 0.5;

/// Collider density shared by every card body.
///
/// Only mass *ratios* matter for this effect; a uniform density makes each
/// card's mass proportional to its on-screen area, which is what the eye
/// expects when a big portrait shoulders a small disc aside.
pub const BODY_DENSITY: f32 = 1.0;

// ── Physics: Reveal-page parameter set ───────────────────────────────────────

/// Contact friction for bodies on the reveal page.  Low, so the packed
/// fillers slide into a heap instead of sticking mid-pile.
pub const FILLER_FRICTION: f32 = 0.05;

/// Restitution for bodies on the reveal page, noticeably bouncier than the
/// click-toggle page.
pub const FILLER_RESTITUTION: f32 = 0.6;

/// Angular damping for reveal-page bodies.  Zero: fillers are discs and free
/// spin reads as energy, not noise.
pub const FILLER_ANGULAR_DAMPING: f32 = 0.0;

// ── Placement sampler ────────────────────────────────────────────────────────

/// Container width (px) below which the narrow placement profile applies.
pub const WIDE_BREAKPOINT: f32 = 960.0;

/// Minimum clearance (px) between any two placed shapes, narrow containers.
pub const PADDING_NARROW: f32 = 20.0;

/// Minimum clearance (px) between any two placed shapes, wide containers.
pub const PADDING_WIDE: f32 = 30.0;

/// Smallest filler radius (px) drawn in narrow containers.
pub const FILLER_BASE_RADIUS_NARROW: f32 = 10.0;

/// Smallest filler radius (px) drawn in wide containers.
pub const FILLER_BASE_RADIUS_WIDE: f32 = 30.0;

/// Random extent added on top of the base radius: radius ∈ [base, base + 50].
pub const FILLER_RADIUS_EXTENT: f32 = 50.0;

/// Position draws attempted per filler candidate before it counts as one
/// failure.
pub const CANDIDATE_DRAW_CAP: u32 = 10;

/// Consecutive candidate failures after which the container is treated as
/// saturated and generation stops.
pub const FAILURE_STREAK_CAP: u32 = 100;

/// Draws attempted when clearance-placing the second fixed button before
/// falling back to its configured anchor.
pub const BUTTON_CLEARANCE_DRAW_CAP: u32 = 100;

// ── Activation timing ────────────────────────────────────────────────────────

/// Seconds the reveal page stays in freefall before bodies re-freeze in
/// place.  Re-arming while pending cancels the old countdown first.
pub const REFREEZE_DELAY_SECS: f32 = 6.0;

/// Seconds between pressing REPLAY (which restores initial poses) and the
/// fresh automatic drop.
pub const REPLAY_DROP_DELAY_SECS: f32 = 0.6;

// ── Page layout ──────────────────────────────────────────────────────────────

/// Height of the manual page header band above the drop region (px).
pub const HEADER_HEIGHT: f32 = 120.0;

/// Hero-section height above the drop region on the reveal page (px).  The
/// drop region starts below the fold; scrolling it into view fires the
/// one-shot drop.
pub const REVEAL_SPACER_PX: f32 = 760.0;

/// Height of the reveal page's drop region (px).
pub const AUTO_SECTION_HEIGHT: f32 = 520.0;

/// Pixels scrolled per mouse-wheel line.
pub const SCROLL_LINE_PX: f32 = 48.0;

// ── Card geometry: click-toggle page ─────────────────────────────────────────
// Anchor poses are the held positions the cards return to on reset, in
// container space (origin top-left, y down, centre-of-mass coordinates).

/// Portrait card size (px).
pub const PORTRAIT_SIZE: (f32, f32) = (180.0, 120.0);

/// Portrait card held anchor.
pub const PORTRAIT_ANCHOR: (f32, f32) = (250.0, 100.0);

/// First pill button size (px).
pub const PILL_A_SIZE: (f32, f32) = (170.0, 56.0);

/// First pill button held anchor.
pub const PILL_A_ANCHOR: (f32, f32) = (400.0, 300.0);

/// Second pill button size (px).
pub const PILL_B_SIZE: (f32, f32) = (150.0, 56.0);

/// Second pill button held anchor.
pub const PILL_B_ANCHOR: (f32, f32) = (700.0, 200.0);

/// Large disc radius (px).
pub const DISC_A_RADIUS: f32 = 60.0;

/// Large disc held anchor.
pub const DISC_A_ANCHOR: (f32, f32) = (500.0, 200.0);

/// Small disc radius (px).
pub const DISC_B_RADIUS: f32 = 40.0;

/// Small disc held anchor.
pub const DISC_B_ANCHOR: (f32, f32) = (900.0, 100.0);

// ── Card geometry: reveal page ───────────────────────────────────────────────

/// First reveal-page pill size (px).
pub const AUTO_PILL_A_SIZE: (f32, f32) = (170.0, 56.0);

/// First reveal-page pill held anchor.
pub const AUTO_PILL_A_ANCHOR: (f32, f32) = (320.0, 140.0);

/// Second reveal-page pill size (px).
pub const AUTO_PILL_B_SIZE: (f32, f32) = (150.0, 56.0);

/// Fallback anchor for the second reveal-page pill.  Its real anchor is
/// drawn at setup with the same clearance rule the filler sampler uses, so
/// it never stacks on the first pill; this anchor is used only if the draw
/// cap is exhausted.
pub const AUTO_PILL_B_ANCHOR: (f32, f32) = (640.0, 220.0);
