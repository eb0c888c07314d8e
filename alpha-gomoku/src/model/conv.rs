use std::path::Path;

use gomoku::{Board, Color};
use log::info;
use tch::{
    data::Iter2,
    nn::{self, OptimizerConfig},
    Kind,
    Tensor,
};

use super::{
    network::{Eval, Network, Policy},
    DEVICE,
};
use crate::{error::Error, example::Example, rules::GomokuRules};

const FILTERS: i64 = 128;
const CONV_LAYERS: usize = 4;
const HIDDEN: [i64; 2] = [1024, 512];
const DROPOUT: f64 = 0.3;

const EPOCHS: usize = 10;
const BATCH_SIZE: i64 = 64;
const LEARNING_RATE: f64 = 1e-3;

/// Convolutional policy and value network for an `N`x`N` board.
#[derive(Debug)]
pub struct ConvNet<const N: usize> {
    vs: nn::VarStore,
    convolutions: Vec<nn::Conv2D>,
    conv_norms: Vec<nn::BatchNorm>,
    hidden: Vec<nn::Linear>,
    hidden_norms: Vec<nn::BatchNorm>,
    fully_connected_policy: nn::Linear,
    fully_connected_eval: nn::Linear,
}

impl<const N: usize> Default for ConvNet<N> {
    fn default() -> Self {
        let vs = nn::VarStore::new(*DEVICE);
        let root = &vs.root();
        let n = N as i64;

        let conv_config = nn::ConvConfig {
            padding: 1,
            bias: false,
            ..Default::default()
        };
        let mut convolutions = Vec::with_capacity(CONV_LAYERS);
        let mut conv_norms = Vec::with_capacity(CONV_LAYERS);
        convolutions.push(nn::conv2d(root, 1, FILTERS, 3, conv_config));
        conv_norms.push(nn::batch_norm2d(root, FILTERS, Default::default()));
        for _ in 1..CONV_LAYERS {
            convolutions.push(nn::conv2d(root, FILTERS, FILTERS, 3, conv_config));
            conv_norms.push(nn::batch_norm2d(root, FILTERS, Default::default()));
        }

        let mut hidden = Vec::with_capacity(HIDDEN.len());
        let mut hidden_norms = Vec::with_capacity(HIDDEN.len());
        let mut inputs = FILTERS * n * n;
        for outputs in HIDDEN {
            hidden.push(nn::linear(root, inputs, outputs, Default::default()));
            hidden_norms.push(nn::batch_norm1d(root, outputs, Default::default()));
            inputs = outputs;
        }

        let fully_connected_policy = nn::linear(root, inputs, n * n, Default::default());
        let fully_connected_eval = nn::linear(root, inputs, 1, Default::default());

        ConvNet {
            vs,
            convolutions,
            conv_norms,
            hidden,
            hidden_norms,
            fully_connected_policy,
            fully_connected_eval,
        }
    }
}

/// Own stones are 1, opponent stones are -1.
fn board_repr<const N: usize>(board: &Board<N>) -> Tensor {
    let cells: Vec<f32> = board
        .iter()
        .map(|(_, cell)| match cell {
            Some(Color::Black) => 1.0,
            Some(Color::White) => -1.0,
            None => 0.0,
        })
        .collect();
    Tensor::of_slice(&cells).view([1, N as i64, N as i64])
}

impl<const N: usize> ConvNet<N> {
    /// Returns log-probabilities for the policy.
    fn forward(&self, input: &Tensor, train: bool) -> (Tensor, Tensor) {
        let s = self
            .convolutions
            .iter()
            .zip(&self.conv_norms)
            .fold(input.shallow_clone(), |s, (conv, norm)| {
                s.apply(conv).apply_t(norm, train).relu()
            })
            .view([-1, FILTERS * (N * N) as i64]);
        let s = self
            .hidden
            .iter()
            .zip(&self.hidden_norms)
            .fold(s, |s, (linear, norm)| {
                s.apply(linear).apply_t(norm, train).relu().dropout(DROPOUT, train)
            });
        let policy = s.apply(&self.fully_connected_policy).log_softmax(1, Kind::Float);
        let eval = s.apply(&self.fully_connected_eval).tanh();
        (policy, eval)
    }
}

impl<const N: usize, const K: usize> Network<GomokuRules<N, K>> for ConvNet<N> {
    fn initialize(_rules: &GomokuRules<N, K>) -> Self {
        Self::default()
    }

    fn policy_eval(&self, positions: &[Board<N>]) -> Vec<(Policy, Eval)> {
        if positions.is_empty() {
            return Vec::new();
        }
        let boards: Vec<_> = positions.iter().map(board_repr).collect();
        let input = Tensor::stack(&boards, 0).to_device(*DEVICE);
        let (policy, eval) = tch::no_grad(|| self.forward(&input, false));
        let policies: Vec<Vec<f32>> = policy.exp().into();
        let evals: Vec<f32> = eval.view([-1]).into();
        policies.into_iter().zip(evals).collect()
    }

    fn train(&mut self, examples: &[Example<Board<N>>]) -> Result<(), Error> {
        info!("starting training with {} examples", examples.len());
        if examples.is_empty() {
            return Ok(());
        }
        let mut opt = nn::Adam::default().build(&self.vs, LEARNING_RATE)?;

        let inputs: Vec<_> = examples.iter().map(|ex| board_repr(&ex.position)).collect();
        let targets: Vec<_> = examples
            .iter()
            .map(|ex| {
                let mut target = ex.policy.clone();
                target.push(ex.result);
                Tensor::of_slice(&target)
            })
            .collect();
        let inputs = Tensor::stack(&inputs, 0);
        let targets = Tensor::stack(&targets, 0);

        for epoch in 0..EPOCHS {
            let mut batches = Iter2::new(&inputs, &targets, BATCH_SIZE);
            let batches = batches.to_device(*DEVICE).shuffle();
            let mut total = 0.0;
            let mut count = 0;
            for (input, target) in batches {
                let batch_size = input.size()[0];
                let (policy, eval) = self.forward(&input, true);

                let mut split = target.split((N * N) as i64, 1);
                let z = split.pop().ok_or_else(|| Error::Network("missing value target".into()))?;
                let p = split.pop().ok_or_else(|| Error::Network("missing policy target".into()))?;

                let loss_p = -(p * policy).sum(Kind::Float) / batch_size;
                let loss_z = (z - eval).square().sum(Kind::Float) / batch_size;
                let loss = loss_p + loss_z;
                opt.backward_step(&loss);

                total += loss.double_value(&[]);
                count += 1;
            }
            info!("epoch {epoch}: loss={:.4}", total / count.max(1) as f64);
        }
        Ok(())
    }

    fn save<T: AsRef<Path>>(&self, path: T) -> Result<(), Error> {
        self.vs.save(path)?;
        Ok(())
    }

    fn load<T: AsRef<Path>>(path: T) -> Result<Self, Error> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let mut net = Self::default();
        net.vs.load(path)?;
        Ok(net)
    }
}
