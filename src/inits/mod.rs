pub(crate) mod randomizedgreedy;
