use bevy_ecs::prelude::*;

use crate::components::{
    globe::{FrameClock, Spin},
    marker::Pulse,
};

// per-frame steps, independent of how long the frame took
pub fn spin(mut spinners: Query<&mut Spin>) {
    for mut spin in &mut spinners {
        spin.advance();
    }
}

pub fn pulse(clock: Res<FrameClock>, mut pulses: Query<&mut Pulse>) {
    if clock.delta_seconds == 0.0 {
        return;
    }
    for mut pulse in &mut pulses {
        pulse.advance(clock.delta_seconds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_and_pulse_advance_once_per_run() {
        let mut world = World::new();
        world.insert_resource(FrameClock::default());
        let globe = world.spawn(Spin::new(0.002)).id();
        let marker = world.spawn(Pulse::new(0.0)).id();

        let mut schedule = Schedule::default();
        schedule.add_systems((spin, pulse));

        for _ in 0..3 {
            world.resource_mut::<FrameClock>().tick(0.5);
            schedule.run(&mut world);
        }

        assert!((world.get::<Spin>(globe).unwrap().angle - 0.006).abs() < 1e-12);
        let pulse = world.get::<Pulse>(marker).unwrap();
        assert_eq!(pulse.elapsed_seconds, 1.5);
        assert!((pulse.z_scale() - 1.3).abs() < 1e-12);
    }
}
