#[cfg(test)]
mod tests {
    use env_logger;
    use gridindex::{LatLong, OverlayConfig, OverlayContext, Scheme};
    use tracing::info;

    const TOKYO: LatLong = LatLong {
        latitude: 35.681,
        longitude: 139.767,
    };

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn overlay(scheme: Scheme) -> OverlayContext {
        OverlayContext::new(OverlayConfig::default().with_scheme(scheme))
    }

    #[test]
    fn test_every_scheme_draws_around_tokyo() {
        init();
        for scheme in Scheme::ALL {
            let mut overlay = overlay(scheme);
            let cells = overlay.update(&TOKYO, 12).unwrap().unwrap();
            info!("{}: {} cells", scheme, cells.len());
            assert!(!cells.is_empty(), "{} drew nothing", scheme);
            assert!(
                cells
                    .iter()
                    .any(|cell| cell.bbox.contains(TOKYO.latitude, TOKYO.longitude)),
                "{} has no cell over Tokyo",
                scheme
            );
        }
    }

    #[test]
    fn test_quadtree_layers_at_zoom_five() {
        init();
        let mut overlay = overlay(Scheme::Quadtree);
        let cells = overlay.update(&TOKYO, 5).unwrap().unwrap();
        // Three layers of four children each
        assert_eq!(cells.len(), 12);
        let lengths: Vec<usize> = cells.iter().map(|c| c.code.len()).collect();
        assert_eq!(&lengths[..4], &[4, 4, 4, 4]);
        assert_eq!(&lengths[8..], &[6, 6, 6, 6]);
    }

    #[test]
    fn test_redraw_only_when_prefix_changes() {
        init();
        let mut overlay = overlay(Scheme::Geohash);
        assert!(overlay.update(&TOKYO, 6).unwrap().is_some());
        assert!(overlay.update(&TOKYO, 6).unwrap().is_none());

        let osaka = LatLong::new(34.702, 135.495);
        assert!(overlay.update(&osaka, 6).unwrap().is_some());
    }

    #[test]
    fn test_zoom_change_can_force_redraw() {
        init();
        let mut overlay = overlay(Scheme::Quadtree);
        assert!(overlay.update(&TOKYO, 6).unwrap().is_some());
        assert!(overlay.update(&TOKYO, 7).unwrap().is_some());
    }

    #[test]
    fn test_switching_scheme_invalidates() {
        init();
        let mut overlay = overlay(Scheme::Quadtree);
        overlay.update(&TOKYO, 10).unwrap();

        overlay.set_scheme(Scheme::Slippy);
        let cells = overlay.update(&TOKYO, 10).unwrap().unwrap();
        assert!(cells.iter().all(|c| c.labels.short.is_empty()));
        assert!(cells.iter().all(|c| c.labels.long.split('/').count() == 3));
    }

    #[test]
    fn test_select_scheme_by_name() {
        init();
        let mut overlay = OverlayContext::default();
        assert_eq!(overlay.select_scheme("jisx0410mesh"), Scheme::Mesh);
        let cells = overlay.update(&TOKYO, 8).unwrap().unwrap();
        // The 80km neighbourhood around Tokyo
        assert_eq!(cells.len(), 100);
        assert!(cells.iter().any(|c| c.code == "5339"));

        assert_eq!(overlay.select_scheme("unknown"), Scheme::Quadtree);
        assert!(overlay.update(&TOKYO, 8).unwrap().is_some());
    }

    #[test]
    fn test_mesh_overlay_leaving_and_reentering_domain() {
        init();
        let mut overlay = overlay(Scheme::Mesh);
        assert!(overlay.update(&TOKYO, 12).unwrap().is_some());

        let honolulu = LatLong::new(21.3069, -157.8583);
        assert_eq!(overlay.update(&honolulu, 12).unwrap(), Some(Vec::new()));

        let cells = overlay.update(&TOKYO, 12).unwrap().unwrap();
        assert!(!cells.is_empty());
    }

    #[test]
    fn test_mesh_fine_layers() {
        init();
        let mut overlay = overlay(Scheme::Mesh);
        let cells = overlay.update(&TOKYO, 14).unwrap().unwrap();
        // 80km neighbourhood, 10km children of 5339, 1km children of 533946
        assert_eq!(cells.len(), 100 + 64 + 100);
        assert!(cells.iter().any(|c| c.code == "53394611"));
    }

    #[test]
    fn test_layer_cache_capacity_from_config() {
        init();
        let config = OverlayConfig::default()
            .with_scheme(Scheme::Geohash)
            .with_layer_cache_capacity(2);
        let mut overlay = OverlayContext::new(config);
        overlay.update(&TOKYO, 9).unwrap();
        assert!(overlay.layer_cache().len() <= 2);
    }
}
