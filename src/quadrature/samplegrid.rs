use nalgebra::{
    DVector,
    DVectorView
};

/// [a, b] 上 n 等分的取樣點，共 n + 1 點。
///
/// 與 `linspace` 相同：x_i = a + i·(b - a)/n，最後一點直接設為 b；
/// stride 取 x_1 - x_0，而非 (b - a)/n。
pub struct SampleGrid {
    points: DVector<f64>,
    stride: f64,
}

impl SampleGrid {
    pub fn new(a: f64, b: f64, subintervals: usize) -> SampleGrid {
        let n = subintervals.max(1);
        let delta = (b - a) / n as f64;
        let points = DVector::from_fn(n + 1, |i, _| if i == n { b } else { a + i as f64 * delta });
        let stride = points[1] - points[0];
        SampleGrid { points, stride }
    }

    pub fn subintervals(&self) -> usize {
        self.points.len() - 1
    }

    pub fn stride(&self) -> f64 {
        self.stride
    }

    pub fn points(&self) -> &DVector<f64> {
        &self.points
    }

    /// 每個子區間的左端點（不含最後一點）。
    pub fn left_points(&self) -> DVectorView<'_, f64> {
        self.points.rows(0, self.subintervals())
    }

    /// 每個子區間的右端點（不含第一點）。
    pub fn right_points(&self) -> DVectorView<'_, f64> {
        self.points.rows(1, self.subintervals())
    }
}
