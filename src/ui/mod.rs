/// UI layer: top bar and filter panels, summary cards, and the chart grid.

pub mod cards;
pub mod charts;
pub mod panels;
