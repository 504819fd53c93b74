use super::*;

/// Mean held-out R² of a `Ridge` refit from scratch on every fold.
fn refit_fold_mean(alpha: f64, x: &Matrix<f64>, y: &Vector<f64>, folds: usize) -> f64 {
    let splits = KFold::new(folds).split(x.n_rows()).expect("valid folds");
    let total: f64 = splits
        .iter()
        .map(|(train, test)| {
            let mut model = Ridge::new(alpha);
            model
                .fit(&x.select_rows(train), &y.select(train))
                .expect("fold fit");
            model
                .score(&x.select_rows(test), &y.select(test))
                .expect("fold score")
        })
        .sum();
    total / splits.len() as f64
}

/// Deterministic, mildly noisy regression data with two features.
fn wavy_data(n: usize) -> (Matrix<f64>, Vector<f64>) {
    let mut data = Vec::with_capacity(n * 2);
    let mut target = Vec::with_capacity(n);
    for i in 0..n {
        let a = (i as f64 * 0.37).sin() * 3.0;
        let b = (i as f64 * 0.11).cos() + i as f64 * 0.01;
        data.push(a);
        data.push(b);
        target.push(1.5 * a - 2.0 * b + 0.3 * (i as f64 * 1.7).sin());
    }
    (
        Matrix::from_vec(n, 2, data).expect("n x 2"),
        Vector::from_vec(target),
    )
}

#[test]
fn test_logspace_grid() {
    let grid = logspace(-3.0, 3.0, 13);
    assert_eq!(grid.len(), 13);
    for (i, alpha) in grid.iter().enumerate() {
        let expected = 10f64.powf(-3.0 + 0.5 * i as f64);
        assert!((alpha - expected).abs() <= expected * 1e-12);
    }
    assert!(grid.windows(2).all(|w| w[0] < w[1]));

    assert!(logspace(0.0, 1.0, 0).is_empty());
    assert_eq!(logspace(2.0, 5.0, 1), vec![100.0]);
}

#[test]
fn test_best_index_prefers_first_on_ties() {
    assert_eq!(best_index(&[0.5, 0.9, 0.9, 0.1]), Some(1));
    assert_eq!(best_index(&[f64::NAN, 0.2, 0.1]), Some(1));
    assert_eq!(best_index(&[f64::NAN]), None);
    assert_eq!(best_index(&[]), None);
}

#[test]
fn test_selected_alpha_from_grid() {
    let (x, y) = wavy_data(60);
    let grid = logspace(-3.0, 3.0, 13);

    let mut model = RidgeCV::new(grid.clone());
    model.fit(&x, &y).expect("fit should succeed");

    let alpha = model.alpha().expect("fitted");
    assert!(grid.contains(&alpha));
    assert_eq!(model.cv_scores().expect("fitted").len(), 13);
}

#[test]
fn test_selected_alpha_has_best_mean_score() {
    let (x, y) = wavy_data(80);
    let mut model = RidgeCV::new(logspace(-3.0, 3.0, 13));
    model.fit(&x, &y).expect("fit should succeed");

    let scores = model.cv_scores().expect("fitted");
    let best = model.best_score().expect("fitted");
    assert!(scores.iter().all(|&s| s <= best));
}

#[test]
fn test_cv_scores_match_refitting_each_fold() {
    let (x, y) = wavy_data(47);
    let grid = vec![0.01, 1.0, 50.0];

    let mut model = RidgeCV::new(grid.clone());
    model.fit(&x, &y).expect("fit should succeed");
    let scores = model.cv_scores().expect("fitted");

    for (i, &alpha) in grid.iter().enumerate() {
        let direct = refit_fold_mean(alpha, &x, &y, 5);
        assert!(
            (scores[i] - direct).abs() < 1e-8,
            "alpha={alpha}: gram-subtraction score {} vs refit score {direct}",
            scores[i]
        );
    }
}

#[test]
fn test_noise_free_data_prefers_least_shrinkage() {
    let x = Matrix::from_vec(20, 1, (0..20).map(|i| i as f64).collect()).expect("20x1");
    let y: Vector<f64> = (0..20).map(|i| 0.5 * i as f64 + 3.0).collect();

    let mut model = RidgeCV::new(logspace(-3.0, 3.0, 13));
    model.fit(&x, &y).expect("fit should succeed");

    assert_eq!(model.alpha(), Some(logspace(-3.0, 3.0, 13)[0]));
    let pred = model.predict(&x).expect("fitted");
    assert!((pred[10] - 8.0).abs() < 1e-2);
}

#[test]
fn test_refit_matches_plain_ridge() {
    let (x, y) = wavy_data(50);
    let mut cv_model = RidgeCV::new(vec![0.5]);
    cv_model.fit(&x, &y).expect("fit should succeed");

    let mut ridge = Ridge::new(0.5);
    ridge.fit(&x, &y).expect("fit should succeed");

    let a = cv_model.predict(&x).expect("fitted");
    let b = ridge.predict(&x).expect("fitted");
    for i in 0..a.len() {
        assert!((a[i] - b[i]).abs() < 1e-12);
    }
    assert_eq!(cv_model.intercept(), Some(ridge.intercept()));
}

#[test]
fn test_errors() {
    let (x, y) = wavy_data(20);

    assert!(RidgeCV::new(vec![]).fit(&x, &y).is_err());
    assert!(RidgeCV::new(vec![1.0, 0.0]).fit(&x, &y).is_err());
    assert!(RidgeCV::new(vec![-1.0]).fit(&x, &y).is_err());
    assert!(RidgeCV::new(vec![1.0]).with_cv(1).fit(&x, &y).is_err());

    let (small_x, small_y) = wavy_data(3);
    assert!(RidgeCV::new(vec![1.0]).fit(&small_x, &small_y).is_err());

    let unfitted = RidgeCV::new(vec![1.0]);
    assert!(unfitted.predict(&x).is_err());
    assert!(unfitted.alpha().is_none());
}
