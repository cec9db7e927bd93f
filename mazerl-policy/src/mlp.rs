//! Minimal matrix type and MLP forward pass, no tensor backend required.
use serde::{Deserialize, Serialize};

/// A dense row-major matrix of `f32`.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Mat {
    /// Creates a matrix from row-major data.
    ///
    /// Panics if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<f32>) -> Self {
        if data.len() != rows * cols {
            panic!(
                "Matrix data of length {} does not fill {}x{}",
                data.len(),
                rows,
                cols
            );
        }
        Self { rows, cols, data }
    }

    /// The all-zero matrix of the given dimensions.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::new(rows, cols, vec![0.0; rows * cols])
    }

    /// A single-column matrix holding the given values.
    pub fn column(data: Vec<f32>) -> Self {
        let rows = data.len();
        Self::new(rows, 1, data)
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major values.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Matrix product `self * rhs`.
    ///
    /// Panics on mismatched inner dimensions.
    pub fn matmul(&self, rhs: &Mat) -> Mat {
        if self.cols != rhs.rows {
            panic!(
                "Trying to multiply a {}x{} matrix by a {}x{} one",
                self.rows, self.cols, rhs.rows, rhs.cols
            );
        }
        let mut out = Mat::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let mut acc = 0.0;
                for k in 0..self.cols {
                    acc += self.data[i * self.cols + k] * rhs.data[k * rhs.cols + j];
                }
                out.data[i * rhs.cols + j] = acc;
            }
        }
        out
    }

    /// Element-wise sum.
    ///
    /// Panics on mismatched dimensions.
    pub fn add(&self, rhs: &Mat) -> Mat {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!(
                "Trying to add matrices of different sizes: {}x{} and {}x{}",
                self.rows, self.cols, rhs.rows, rhs.cols
            );
        }
        let data = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(a, b)| a + b)
            .collect();
        Mat::new(self.rows, self.cols, data)
    }

    /// Element-wise rectifier.
    pub fn relu(&self) -> Mat {
        let data = self.data.iter().map(|v| v.max(0.0)).collect();
        Mat::new(self.rows, self.cols, data)
    }

    /// Element-wise hyperbolic tangent.
    pub fn tanh(&self) -> Mat {
        let data = self.data.iter().map(|v| v.tanh()).collect();
        Mat::new(self.rows, self.cols, data)
    }
}

/// Multilayer perceptron with ReLU hidden layers and a tanh output.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mlp {
    ws: Vec<Mat>,
    bs: Vec<Mat>,
}

impl Mlp {
    /// Creates an MLP from per-layer weights and biases.
    ///
    /// Panics if the numbers of weight and bias matrices differ.
    pub fn new(ws: Vec<Mat>, bs: Vec<Mat>) -> Self {
        if ws.len() != bs.len() {
            panic!(
                "Got {} weight matrices but {} bias vectors",
                ws.len(),
                bs.len()
            );
        }
        Self { ws, bs }
    }

    /// A zero-weight network with the given layer sizes, first to last.
    pub fn zeros(layers: &[usize]) -> Self {
        let ws = layers
            .windows(2)
            .map(|d| Mat::zeros(d[1], d[0]))
            .collect();
        let bs = layers.windows(2).map(|d| Mat::zeros(d[1], 1)).collect();
        Self { ws, bs }
    }

    /// Size of the input layer.
    pub fn n_inputs(&self) -> usize {
        self.ws[0].cols()
    }

    /// Size of the output layer.
    pub fn n_outputs(&self) -> usize {
        self.ws[self.ws.len() - 1].rows()
    }

    /// Runs the network on a column vector.
    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        x.tanh()
    }
}
