/// Names accepted between `<` and `>` as symbolic keys.
///
/// Matching is case-sensitive and a name only counts when it is directly
/// followed by `>`, so `Page` never shadows `PageUp`.
pub static SYMBOLIC_KEYS: &[&str] = &[
	"Backspace",
	"Begin",
	"Delete",
	"Down",
	"End",
	"Enter",
	"Escape",
	"Home",
	"Insert",
	"Left",
	"PageDown",
	"PageUp",
	"Right",
	"Space",
	"Tab",
	"Up",
	"KP0",
	"KP1",
	"KP2",
	"KP3",
	"KP4",
	"KP5",
	"KP6",
	"KP7",
	"KP8",
	"KP9",
	"KPEnter",
	"KPPlus",
	"KPMinus",
	"KPMult",
	"KPDiv",
	"KPComma",
	"KPPeriod",
	"KPEquals",
];
