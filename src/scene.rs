use anyhow::Context;
use bevy_ecs::prelude::*;
use cgmath::Matrix4;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    components::{
        calibration::{Calibration, CalibrationControls, CalibrationOffset},
        camera::{Camera, CameraUniform},
        coordinates::GeoCoordinate,
        country::Country,
        globe::{FrameClock, Globe, GlobeSettings, GlowShell, Spin, StarField},
        marker::{CountryMarker, DebugMarker, MarkerInstance, MarkerPlacement, Pulse},
        population::ScaleConfig,
    },
    matrix4_to_array,
    systems::{
        animation, markers, markers::MarkerSystem, picking::PickingSystem,
        starfield::StarFieldSystem,
    },
    DEBUG_MARKER_SPIN_PER_FRAME, DEBUG_REFERENCE, GLOBE_RADIUS, GLOBE_SPIN_PER_FRAME,
    GLOW_SHELL_SCALE, PULSE_MAX_DELAY_SECONDS, STARFIELD_EXTENT, STARFIELD_SPIN_PER_FRAME,
    STAR_COUNT,
};

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub radius: f64,
    pub scale: ScaleConfig,
    /// Starts where the calibration sliders start, so both agree on frame one.
    pub calibration: CalibrationOffset,
    pub debug_marker: GeoCoordinate,
    /// Fixed seed for the star field and pulse delays; entropy when absent.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            radius: GLOBE_RADIUS,
            scale: ScaleConfig::default(),
            calibration: CalibrationControls::default().offset(),
            debug_marker: DEBUG_REFERENCE,
            seed: None,
        }
    }
}

impl SceneConfig {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("failed to decode scene config")
    }
}

/// The globe, its decorations and markers, advanced once per display refresh
/// by the host. Every marker position goes through the same calibrated
/// coordinate conversion.
pub struct GlobeScene {
    world: World,
    frame_schedule: Schedule,
    placement_schedule: Schedule,
    camera: Camera,
    globe: Entity,
    glow: Entity,
    stars: Entity,
    debug_marker: Entity,
    markers: Vec<Entity>,
    rng: StdRng,
}

impl GlobeScene {
    pub fn new(config: SceneConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut world = World::new();
        world.insert_resource(Calibration(config.calibration));
        world.insert_resource(GlobeSettings {
            radius: config.radius,
            scale: config.scale,
        });
        world.insert_resource(FrameClock::default());

        let globe = world
            .spawn((
                Globe {
                    radius: config.radius,
                },
                Spin::new(GLOBE_SPIN_PER_FRAME),
            ))
            .id();
        let glow = world
            .spawn((
                GlowShell {
                    scale: GLOW_SHELL_SCALE,
                },
                Spin::new(GLOBE_SPIN_PER_FRAME),
            ))
            .id();
        let stars = world
            .spawn((
                StarField {
                    positions: StarFieldSystem::generate_positions(
                        &mut rng,
                        STAR_COUNT,
                        STARFIELD_EXTENT,
                    ),
                },
                Spin::new(STARFIELD_SPIN_PER_FRAME),
            ))
            .id();
        let debug_marker = world
            .spawn((
                DebugMarker {
                    coordinate: config.debug_marker,
                },
                MarkerPlacement::default(),
                Spin::new(DEBUG_MARKER_SPIN_PER_FRAME),
            ))
            .id();

        let mut frame_schedule = Schedule::default();
        frame_schedule.add_systems((animation::spin, animation::pulse));
        let mut placement_schedule = Schedule::default();
        placement_schedule.add_systems(markers::place_markers);

        info!(
            radius = config.radius,
            stars = STAR_COUNT,
            seeded = config.seed.is_some(),
            "globe scene ready"
        );

        let mut scene = Self {
            world,
            frame_schedule,
            placement_schedule,
            camera: Camera::default(),
            globe,
            glow,
            stars,
            debug_marker,
            markers: Vec::new(),
            rng,
        };
        scene.placement_schedule.run(&mut scene.world);
        scene
    }

    pub fn calibration(&self) -> CalibrationOffset {
        self.world.resource::<Calibration>().0
    }

    pub fn set_calibration(&mut self, offset: CalibrationOffset) {
        self.world
            .resource_mut::<Calibration>()
            .set_if_neq(Calibration(offset));
        self.placement_schedule.run(&mut self.world);
    }

    /// Replaces all country markers. Returns how many countries got a marker.
    pub fn load_countries(&mut self, countries: impl IntoIterator<Item = Country>) -> usize {
        for entity in self.markers.drain(..) {
            self.world.despawn(entity);
        }

        let mut skipped = 0;
        for country in countries {
            let Some(coordinate) = country.coordinate() else {
                debug!(name = %country.name, "country has no usable coordinate");
                skipped += 1;
                continue;
            };
            let delay = self.rng.gen_range(0.0..PULSE_MAX_DELAY_SECONDS);
            let entity = self
                .world
                .spawn((
                    CountryMarker {
                        name: country.name,
                        population: country.population,
                        coordinate,
                    },
                    MarkerPlacement::default(),
                    Pulse::new(delay),
                ))
                .id();
            self.markers.push(entity);
        }

        self.placement_schedule.run(&mut self.world);
        info!(placed = self.markers.len(), skipped, "loaded country markers");
        self.markers.len()
    }

    pub fn load_countries_json(&mut self, json: &str) -> anyhow::Result<usize> {
        let countries = Country::from_json(json)?;
        Ok(self.load_countries(countries))
    }

    pub fn set_debug_marker(&mut self, coordinate: GeoCoordinate) {
        if let Some(mut marker) = self.world.get_mut::<DebugMarker>(self.debug_marker) {
            marker.coordinate = coordinate;
        }
        self.placement_schedule.run(&mut self.world);
    }

    /// Runs one display refresh worth of animation.
    pub fn advance_frame(&mut self, delta_seconds: f64) {
        self.world.resource_mut::<FrameClock>().tick(delta_seconds);
        self.frame_schedule.run(&mut self.world);
        self.placement_schedule.run(&mut self.world);
    }

    pub fn frame(&self) -> u64 {
        self.world.resource::<FrameClock>().frame
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Country placements in feed order.
    pub fn country_placements(&self) -> Vec<(&str, MarkerPlacement)> {
        self.markers
            .iter()
            .filter_map(|&entity| {
                let marker = self.world.get::<CountryMarker>(entity)?;
                let placement = self.world.get::<MarkerPlacement>(entity)?;
                Some((marker.name.as_str(), *placement))
            })
            .collect()
    }

    pub fn debug_placement(&self) -> Option<MarkerPlacement> {
        self.world.get::<MarkerPlacement>(self.debug_marker).copied()
    }

    /// Country markers in feed order, then the debug marker.
    pub fn marker_instances(&self) -> Vec<MarkerInstance> {
        let rotation = self.globe_rotation();
        let mut instances: Vec<MarkerInstance> = self
            .markers
            .iter()
            .filter_map(|&entity| {
                let placement = self.world.get::<MarkerPlacement>(entity)?;
                let pulse = self.world.get::<Pulse>(entity);
                Some(MarkerSystem::country_instance(placement, pulse, rotation))
            })
            .collect();

        if let Some(placement) = self.world.get::<MarkerPlacement>(self.debug_marker) {
            let spin = self.world.get::<Spin>(self.debug_marker);
            instances.push(MarkerSystem::debug_instance(placement, spin, rotation));
        }
        instances
    }

    pub fn globe_rotation(&self) -> Matrix4<f64> {
        self.spin_of(self.globe).rotation()
    }

    pub fn globe_model_matrix(&self) -> [[f32; 4]; 4] {
        let radius = self
            .world
            .get::<Globe>(self.globe)
            .map_or(GLOBE_RADIUS, |globe| globe.radius);
        matrix4_to_array(self.globe_rotation() * Matrix4::from_scale(radius))
    }

    pub fn glow_model_matrix(&self) -> [[f32; 4]; 4] {
        let radius = self.world.resource::<GlobeSettings>().radius;
        let scale = self
            .world
            .get::<GlowShell>(self.glow)
            .map_or(GLOW_SHELL_SCALE, |glow| glow.scale);
        matrix4_to_array(self.spin_of(self.glow).rotation() * Matrix4::from_scale(radius * scale))
    }

    pub fn star_field_model_matrix(&self) -> [[f32; 4]; 4] {
        matrix4_to_array(self.spin_of(self.stars).rotation())
    }

    pub fn star_positions(&self) -> &[[f32; 3]] {
        self.world
            .get::<StarField>(self.stars)
            .map(|stars| stars.positions.as_slice())
            .unwrap_or_default()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.camera.set_viewport(width, height);
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&self.camera);
        uniform
    }

    /// Coordinate of the globe surface under a pixel, if the pixel hits it.
    pub fn pick(
        &self,
        position_x: f64,
        position_y: f64,
        screen_width: f64,
        screen_height: f64,
    ) -> Option<GeoCoordinate> {
        PickingSystem::pick(
            &self.camera,
            position_x,
            position_y,
            screen_width,
            screen_height,
            self.world.resource::<GlobeSettings>().radius,
            self.globe_rotation(),
            &self.calibration(),
        )
    }

    fn spin_of(&self, entity: Entity) -> Spin {
        self.world.get::<Spin>(entity).copied().unwrap_or_default()
    }
}

impl Default for GlobeScene {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
