pub mod annunciate;
pub mod button_edges;
pub mod consume;
pub mod display;
pub mod rgb_led_indicate;
