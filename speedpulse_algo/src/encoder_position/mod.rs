// Encoder side of the control core: the shared tick counter, the quadrature decoder that
// mutates it from the edge interrupt and the estimator that turns it into speed and distance.

// Detailed Operation:
// `QuadratureDecoder::on_edge()` runs on every pin change of either channel and is the only
// writer of the `TickCounter`. `SpeedEstimator::sample()` runs at the fixed control cadence and
// only takes atomic snapshots, so an edge preempting a sample can never produce a torn value.

// Licensed under the Apache License, Version 2.0
// Copyright 2024 Anton Khrustalev, creapunk.com

pub mod quadrature;
pub mod speed_estimator;
pub mod tick_counter;
