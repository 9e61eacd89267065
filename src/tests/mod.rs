//! Scenario tests driving the whole app through its event-sink surface.
